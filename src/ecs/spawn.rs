use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::components::{
    Area, AreaCore, AreaFactors, AreaPopulation, ConcernedSpecies, Region, RegionBase, RegionCore,
    RegionSurvey,
};
use crate::ecs::relationships::{AreaGrid, InRegion, RegionIndex};
use crate::model::{AreaId, Axial, EnvironmentType, RegionId};

/// Spawn a region entity and register it in the region index.
pub fn spawn_region(world: &mut World, id: RegionId, name: impl Into<String>) -> Entity {
    let entity = world
        .spawn((
            Region,
            RegionCore {
                id,
                name: name.into(),
            },
            RegionBase::default(),
            RegionSurvey::default(),
            ConcernedSpecies::default(),
        ))
        .id();
    if let Some(mut index) = world.get_resource_mut::<RegionIndex>() {
        index.insert(id, entity);
    }
    entity
}

/// Spawn an area entity inside a region and register it on the grid.
pub fn spawn_area(
    world: &mut World,
    id: AreaId,
    environment: EnvironmentType,
    coord: Axial,
    region: Entity,
) -> Entity {
    let entity = world
        .spawn((
            Area,
            AreaCore::new(id, environment, coord),
            AreaPopulation::default(),
            AreaFactors::default(),
            InRegion(region),
        ))
        .id();
    if let Some(mut grid) = world.get_resource_mut::<AreaGrid>() {
        grid.insert(coord, entity);
    }
    entity
}
