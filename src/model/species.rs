use serde::{Deserialize, Serialize};

use super::environment::EnvironmentType;

/// Index into the [`SpeciesRegistry`](crate::ecs::resources::SpeciesRegistry).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct SpeciesId(pub usize);

/// Conservation status of a species, ordered from safest to most threatened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DangerLevel {
    Normal,
    Endangered,
    CriticallyEndangered,
}

impl DangerLevel {
    pub const ALL: [DangerLevel; 3] = [
        DangerLevel::Normal,
        DangerLevel::Endangered,
        DangerLevel::CriticallyEndangered,
    ];
}

/// Signed habitability weight of one environment type for a species.
/// `weight` is in [-1, 1]; positive means the species likes that environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentPreference {
    pub environment: EnvironmentType,
    pub weight: f32,
}

/// Immutable species template. Read-only for the population engine;
/// never mutated during simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    pub description: String,
    /// Minimum population to sustain a colony of level 1..=5.
    pub habitat_min_population: [u32; 5],
    /// Environment the species thrives in when no explicit preference entry exists.
    pub best_environment: EnvironmentType,
    pub environment_preferences: Vec<EnvironmentPreference>,
    /// Other species consumed as food.
    pub prey: Vec<SpeciesId>,
    /// Energy one unit needs per day to be counted as fed.
    pub energy_needs: u32,
    /// Energy one unit yields when eaten.
    pub energy_as_food: u32,
    /// Population gained per fed unit per day.
    pub reproduction_rate: u32,
    /// Maximum units that may migrate out of one area per day. 0 disables migration.
    pub migrate_limit: u32,
    /// Tolerated temperature band, carried as template data for external habitat logic.
    pub temperature_range: (f64, f64),
    /// Population at which the species stops being considered threatened at all.
    pub most_danger_limit: u32,
}

impl Species {
    /// Minimum population needed to sustain a colony of the given level.
    /// Levels above 5 extrapolate to twice the level-5 threshold.
    pub fn min_habitat_population(&self, colony_level: i32) -> u32 {
        match colony_level {
            ..=0 => 0,
            1..=5 => self.habitat_min_population[(colony_level - 1) as usize],
            _ => self.habitat_min_population[4] * 2,
        }
    }

    pub fn max_habitat_population(&self, colony_level: i32) -> u32 {
        self.min_habitat_population(colony_level + 1)
    }

    /// Explicit preference weight for an environment, if one was configured.
    pub fn preference_for(&self, environment: EnvironmentType) -> Option<f32> {
        self.environment_preferences
            .iter()
            .find(|p| p.environment == environment)
            .map(|p| p.weight)
    }

    /// Ordered `(threshold, level)` table, safest first, computed once at
    /// registry build. `most_danger_limit` is split evenly across the danger
    /// level cardinality; an amount at or above a row's threshold classifies
    /// at that row's level.
    pub fn danger_table(&self) -> Vec<(u32, DangerLevel)> {
        let steps = (DangerLevel::ALL.len() - 1) as u32;
        let bucket = self.most_danger_limit / steps;
        DangerLevel::ALL
            .iter()
            .enumerate()
            .map(|(i, &level)| ((steps - i as u32) * bucket, level))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species() -> Species {
        Species {
            name: "Crested Ibis".to_string(),
            description: String::new(),
            habitat_min_population: [10, 40, 90, 160, 250],
            best_environment: EnvironmentType::Wetland,
            environment_preferences: vec![EnvironmentPreference {
                environment: EnvironmentType::Forest,
                weight: 0.5,
            }],
            prey: vec![],
            energy_needs: 2,
            energy_as_food: 4,
            reproduction_rate: 1,
            migrate_limit: 5,
            temperature_range: (-5.0, 35.0),
            most_danger_limit: 100,
        }
    }

    #[test]
    fn habitat_thresholds_by_colony_level() {
        let sp = species();
        assert_eq!(sp.min_habitat_population(0), 0);
        assert_eq!(sp.min_habitat_population(-3), 0);
        assert_eq!(sp.min_habitat_population(1), 10);
        assert_eq!(sp.min_habitat_population(5), 250);
        // Above level 5: twice the level-5 threshold
        assert_eq!(sp.min_habitat_population(6), 500);
        assert_eq!(sp.max_habitat_population(4), 250);
        assert_eq!(sp.max_habitat_population(5), 500);
    }

    #[test]
    fn preference_lookup() {
        let sp = species();
        assert_eq!(sp.preference_for(EnvironmentType::Forest), Some(0.5));
        assert_eq!(sp.preference_for(EnvironmentType::Desert), None);
    }

    #[test]
    fn danger_table_splits_limit_evenly() {
        let sp = species();
        let table = sp.danger_table();
        assert_eq!(
            table,
            vec![
                (100, DangerLevel::Normal),
                (50, DangerLevel::Endangered),
                (0, DangerLevel::CriticallyEndangered),
            ]
        );
    }
}
