use serde::{Deserialize, Serialize};

/// Index into the [`FactorTypeRegistry`](crate::ecs::resources::FactorTypeRegistry).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct FactorTypeId(pub usize);

/// Immutable template for an environmental factor (a localized ecological
/// problem such as pollution). Instances drift daily and are destroyed when
/// they reach a boundary flagged for removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorType {
    pub name: String,
    pub description: String,
    /// Legal value range; instance values are clamped into it every day.
    pub value_range: (f32, f32),
    /// Range a freshly spawned instance draws its value from.
    pub initial_value_range: (f32, f32),
    /// Signed daily drift applied to every live instance.
    pub day_value_change: f32,
    /// Scales how strongly the factor discounts nearby habitat desirability.
    pub habitability_affect_rate: f32,
    pub remove_on_min: bool,
    pub remove_on_max: bool,
    /// Severity descriptions from mildest to most severe, bucketed evenly
    /// across the value rate. At least one label is expected.
    pub tier_labels: Vec<String>,
}

impl FactorType {
    /// Fraction of the legal range the given value sits at, in [0, 1].
    pub fn value_rate(&self, value: f32) -> f32 {
        let (min, max) = self.value_range;
        if max <= min {
            return 0.0;
        }
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    }

    /// Ordered `(rate_threshold, label_index)` table, most severe first,
    /// computed once at registry build. Buckets split [0, 1] evenly across
    /// the configured labels.
    pub fn tier_table(&self) -> Vec<(f32, usize)> {
        let n = self.tier_labels.len().max(1);
        (0..self.tier_labels.len())
            .rev()
            .map(|i| (i as f32 / n as f32, i))
            .collect()
    }
}
