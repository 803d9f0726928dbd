use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;

use crate::model::{EventSpecId, HexSpiral, SpeciesId};

/// Fixed identity of a region.
#[derive(Component, Debug, Clone)]
pub struct RegionCore {
    pub id: crate::model::RegionId,
    pub name: String,
}

/// Base-of-operations bookkeeping for a region. The survey process is
/// dormant until a base area is set.
#[derive(Component, Debug, Clone, Default)]
pub struct RegionBase {
    pub base_area: Option<Entity>,
    pub basement_level: u32,
}

impl RegionBase {
    pub fn is_established(&self) -> bool {
        self.base_area.is_some()
    }
}

/// Rolling survey state of a region.
///
/// `progress` accrues power-seconds each frame; every time it covers the
/// per-area cost one area is surveyed and the remainder carries over.
/// `surveyed_count` resets to zero when it reaches the region's area count,
/// which also restarts the spiral for the next cycle.
#[derive(Component, Debug, Clone)]
pub struct RegionSurvey {
    pub progress: f64,
    pub surveyed_count: usize,
    pub cycles_completed: u64,
    pub reservation_time: f64,
    pub spiral: HexSpiral,
}

impl Default for RegionSurvey {
    fn default() -> Self {
        Self {
            progress: 0.0,
            surveyed_count: 0,
            cycles_completed: 0,
            reservation_time: 1.0,
            spiral: HexSpiral::default(),
        }
    }
}

/// Species the region's open narrative events care about. Refreshed when
/// events are generated or finish; its length feeds the per-area survey cost.
#[derive(Component, Debug, Clone, Default)]
pub struct ConcernedSpecies(pub Vec<SpeciesId>);

/// Per-stage runtime state of an active event. Both booleans only ever go
/// from false to true.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageState {
    pub appeared: bool,
    pub finished: bool,
    pub appeared_on_day: u64,
}

/// A narrative event currently bound to a region. At most one per region.
#[derive(Component, Debug, Clone)]
pub struct ActiveEvent {
    pub spec: EventSpecId,
    pub concerned_species: SpeciesId,
    /// Habitat areas chosen at generation time.
    pub habitats: Vec<Entity>,
    pub stages: Vec<StageState>,
    pub started_on_day: u64,
    pub finished: bool,
}

impl ActiveEvent {
    pub fn new(
        spec: EventSpecId,
        concerned_species: SpeciesId,
        habitats: Vec<Entity>,
        stage_count: usize,
        started_on_day: u64,
    ) -> Self {
        Self {
            spec,
            concerned_species,
            habitats,
            stages: vec![StageState::default(); stage_count],
            started_on_day,
            finished: false,
        }
    }

    /// Whether every prerequisite of the given stage is finished.
    pub fn prerequisites_met(&self, prerequisites: &[usize]) -> bool {
        prerequisites
            .iter()
            .all(|&i| self.stages.get(i).is_some_and(|s| s.finished))
    }
}
