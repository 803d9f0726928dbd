//! Read-only query surface over the simulation world.
//!
//! Everything here takes `&World` and computes on demand; nothing caches.

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::components::{
    ActiveEvent, AreaCore, AreaFactors, AreaPopulation, RegionBase, RegionSurvey,
};
use crate::ecs::relationships::{RegionIndex, RegionMembers};
use crate::ecs::resources::{EventLibrary, FactorTypeRegistry, SpeciesRegistry};
use crate::model::{DangerLevel, FactorTypeId, SpeciesId};

/// Current population of a species on one area.
pub fn species_amount_in_area(world: &World, area: Entity, species: SpeciesId) -> u32 {
    world
        .get::<AreaPopulation>(area)
        .map_or(0, |pop| pop.amount(species))
}

/// Day-over-day population change of a species on one area.
pub fn species_change_in_area(world: &World, area: Entity, species: SpeciesId) -> i64 {
    world
        .get::<AreaPopulation>(area)
        .map_or(0, |pop| pop.change(species))
}

/// Current population of a species across a region.
pub fn species_amount_in_region(world: &World, region: Entity, species: SpeciesId) -> u64 {
    world.get::<RegionMembers>(region).map_or(0, |members| {
        members
            .iter()
            .map(|&area| species_amount_in_area(world, area, species) as u64)
            .sum()
    })
}

/// Day-over-day population change of a species across a region.
pub fn species_change_in_region(world: &World, region: Entity, species: SpeciesId) -> i64 {
    world.get::<RegionMembers>(region).map_or(0, |members| {
        members
            .iter()
            .map(|&area| species_change_in_area(world, area, species))
            .sum()
    })
}

/// World-wide population of a species, summed over every region.
pub fn world_species_amount(world: &World, species: SpeciesId) -> u64 {
    world.resource::<RegionIndex>().iter().fold(0, |total, (_, region)| {
        total + species_amount_in_region(world, region, species)
    })
}

/// Conservation status of a species from its world-wide population.
pub fn species_danger_level(world: &World, species: SpeciesId) -> Option<DangerLevel> {
    let amount = world_species_amount(world, species);
    world
        .resource::<SpeciesRegistry>()
        .danger_level(species, amount.min(u32::MAX as u64) as u32)
}

/// Revealed factors on an area, with the severity description the current
/// value buckets into.
pub fn revealed_factors(world: &World, area: Entity) -> Vec<(FactorTypeId, String)> {
    let registry = world.resource::<FactorTypeRegistry>();
    world.get::<AreaFactors>(area).map_or_else(Vec::new, |factors| {
        factors
            .iter()
            .filter(|instance| instance.revealed)
            .map(|instance| {
                let description = registry
                    .description_for(instance.kind, instance.value)
                    .unwrap_or("")
                    .to_string();
                (instance.kind, description)
            })
            .collect()
    })
}

/// Status of one stage of a region's active event.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub name: String,
    /// Pre-finish description while open, post-finish text once resolved.
    pub description: String,
    pub appeared: bool,
    pub finished: bool,
}

/// Status of a region's active event.
#[derive(Debug, Clone)]
pub struct EventReport {
    pub name: String,
    pub description: String,
    pub stages: Vec<StageReport>,
}

/// The current narrative state of a region, if an event is bound to it.
/// Dormant stages are omitted; the player only sees what has appeared.
pub fn event_report(world: &World, region: Entity) -> Option<EventReport> {
    let event = world.get::<ActiveEvent>(region)?;
    let spec = world.resource::<EventLibrary>().get(event.spec)?;
    let stages = spec
        .stages
        .iter()
        .zip(&event.stages)
        .filter(|(_, state)| state.appeared)
        .map(|(stage_spec, state)| StageReport {
            name: stage_spec.name.clone(),
            description: if state.finished {
                stage_spec.description_after_finish.clone()
            } else {
                stage_spec.description.clone()
            },
            appeared: state.appeared,
            finished: state.finished,
        })
        .collect();
    Some(EventReport {
        name: spec.name.clone(),
        description: spec.description.clone(),
        stages,
    })
}

/// Fraction of the region's areas surveyed in the current cycle.
pub fn survey_ratio(world: &World, region: Entity) -> f64 {
    let surveyed = world
        .get::<RegionSurvey>(region)
        .map_or(0, |s| s.surveyed_count);
    let total = world.get::<RegionMembers>(region).map_or(0, |m| m.len());
    if total == 0 {
        0.0
    } else {
        surveyed as f64 / total as f64
    }
}

/// Basement level of a region, zero before a base is established.
pub fn basement_level(world: &World, region: Entity) -> u32 {
    world
        .get::<RegionBase>(region)
        .map_or(0, |base| base.basement_level)
}

/// Cumulative survey count of an area.
pub fn area_survey_count(world: &World, area: Entity) -> u32 {
    world.get::<AreaCore>(area).map_or(0, |core| core.survey_count)
}
