use serde::{Deserialize, Serialize};

use super::environment::EnvironmentType;
use super::factor::FactorTypeId;
use super::species::SpeciesId;

/// Index into the [`EventLibrary`](crate::ecs::resources::EventLibrary).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct EventSpecId(pub usize);

/// Minimum count of areas of one environment type a region must contain
/// for an event to be eligible there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaRequirement {
    pub environment: EnvironmentType,
    pub count: usize,
}

/// Data-driven predicate evaluated against region and area state once per
/// day by the stage state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StageCondition {
    Always,
    Never,
    /// Total of the species across the region's areas is at least `amount`.
    RegionSpeciesAtLeast { species: SpeciesId, amount: u32 },
    /// Total of the species across the region's areas is at most `amount`.
    RegionSpeciesAtMost { species: SpeciesId, amount: u32 },
    /// No live instance of the factor type remains anywhere in the region.
    FactorCleared { factor: FactorTypeId },
    /// At least one instance of the factor type has been revealed in the region.
    FactorRevealed { factor: FactorTypeId },
    /// The region's survey process has completed at least one full cycle.
    SurveyCycleComplete,
    /// The stage has been revealed for at least this many days.
    DaysSinceAppeared { days: u64 },
}

/// Immutable template for one stage of a narrative event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSpec {
    pub name: String,
    pub description: String,
    pub description_after_finish: String,
    /// Registered with the guide display while the stage is open; empty
    /// text registers nothing.
    pub guide_text: String,
    /// Contribution credited when this stage finishes.
    pub contribution: u32,
    /// Indices of stages that must be finished before this one can appear.
    pub prerequisites: Vec<usize>,
    pub appear_when: StageCondition,
    pub finish_when: StageCondition,
    /// Factor type seeded near the event's habitats at construction.
    pub related_factor: Option<FactorTypeId>,
    /// How many neighbor areas of each habitat receive the related factor.
    pub factor_spawn_count: usize,
}

/// Immutable template for a multi-stage narrative event bound to one region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSpec {
    pub name: String,
    pub description: String,
    pub description_after_finish: String,
    pub area_requirements: Vec<AreaRequirement>,
    pub concerned_species: SpeciesId,
    /// How many habitat areas are selected for the concerned species at
    /// generation time.
    pub habitat_count: usize,
    /// Contribution credited when the whole event finishes.
    pub contribution: u32,
    pub stages: Vec<StageSpec>,
    /// Queued for generation when this event finishes.
    pub next_event: Option<EventSpecId>,
}
