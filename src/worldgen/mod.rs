//! World-builder surface.
//!
//! A `WorldBlueprint` hands the core a finished topology: explicit area
//! descriptors, explicit adjacency pairs, region names. The core performs no
//! geometry; whoever produces the blueprint decides what is adjacent to what.

use std::collections::BTreeMap;

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;
use rand::Rng;
use tracing::{error, warn};

use crate::ecs::resources::{SpeciesRegistry, WorldgenRng};
use crate::ecs::components::AreaPopulation;
use crate::ecs::relationships::InRegion;
use crate::ecs::spawn::{spawn_area, spawn_region};
use crate::ecs::systems::spawn_factors_in_region;
use crate::model::{AreaId, Axial, EnvironmentType, FactorTypeId, RegionId, SpeciesId};

#[derive(Debug, Clone)]
pub struct RegionBlueprint {
    pub id: RegionId,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct AreaBlueprint {
    pub id: AreaId,
    pub environment: EnvironmentType,
    pub region: RegionId,
    pub coord: Axial,
}

/// Initial world-wide population of one species, spread across the areas of
/// its preferred environment with a little jitter.
#[derive(Debug, Clone)]
pub struct SpeciesSeed {
    pub species: SpeciesId,
    pub amount: u32,
}

/// Factor instances present from day zero.
#[derive(Debug, Clone)]
pub struct FactorSeed {
    pub factor: FactorTypeId,
    pub region: RegionId,
    pub count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct WorldBlueprint {
    pub regions: Vec<RegionBlueprint>,
    pub areas: Vec<AreaBlueprint>,
    pub links: Vec<(AreaId, AreaId)>,
    pub initial_species: Vec<SpeciesSeed>,
    pub initial_factors: Vec<FactorSeed>,
}

/// Entity handles produced by `build_world`, for callers that want to
/// address areas and regions directly.
#[derive(Debug, Clone, Default)]
pub struct WorldHandles {
    pub regions: BTreeMap<RegionId, Entity>,
    pub areas: BTreeMap<AreaId, Entity>,
}

/// Materialize a blueprint into the world: regions, areas, adjacency,
/// initial populations, initial factors. Malformed entries log and are
/// skipped; the rest of the blueprint still builds.
pub fn build_world(world: &mut World, blueprint: &WorldBlueprint) -> WorldHandles {
    let mut handles = WorldHandles::default();

    for region in &blueprint.regions {
        if handles.regions.contains_key(&region.id) {
            warn!(id = region.id.0, "duplicate region id in blueprint");
            continue;
        }
        let entity = spawn_region(world, region.id, region.name.clone());
        handles.regions.insert(region.id, entity);
    }

    // Ascending id order keeps region member lists deterministic.
    let mut areas: Vec<&AreaBlueprint> = blueprint.areas.iter().collect();
    areas.sort_unstable_by_key(|a| a.id);
    for area in areas {
        if handles.areas.contains_key(&area.id) {
            warn!(id = area.id.0, "duplicate area id in blueprint");
            continue;
        }
        let Some(&region) = handles.regions.get(&area.region) else {
            error!(
                area = area.id.0,
                region = area.region.0,
                "area references an unknown region"
            );
            continue;
        };
        let entity = spawn_area(world, area.id, area.environment, area.coord, region);
        handles.areas.insert(area.id, entity);
    }

    let mut adjacency = world.resource_mut::<crate::ecs::relationships::AreaAdjacency>();
    for &(a, b) in &blueprint.links {
        if a == b {
            warn!(area = a.0, "self-link in blueprint");
            continue;
        }
        match (handles.areas.get(&a), handles.areas.get(&b)) {
            (Some(&ea), Some(&eb)) => adjacency.add_edge(ea, eb),
            _ => error!(a = a.0, b = b.0, "link references an unknown area"),
        }
    }

    seed_species(world, blueprint, &handles);

    for seed in &blueprint.initial_factors {
        let Some(&region) = handles.regions.get(&seed.region) else {
            error!(region = seed.region.0, "factor seed references an unknown region");
            continue;
        };
        world.resource_scope::<WorldgenRng, ()>(|world, mut rng| {
            spawn_factors_in_region(world, region, seed.factor, seed.count, &mut rng.0);
        });
    }

    handles
}

/// Spread each seeded species across the areas of its preferred environment,
/// an even share per area with ±5% jitter, and snapshot so day-zero change
/// queries read zero.
fn seed_species(world: &mut World, blueprint: &WorldBlueprint, handles: &WorldHandles) {
    for seed in &blueprint.initial_species {
        let Some(species) = world
            .resource::<SpeciesRegistry>()
            .get(seed.species)
            .cloned()
        else {
            error!(species = seed.species.0, "seed references an unregistered species");
            continue;
        };
        let targets: Vec<Entity> = handles
            .areas
            .values()
            .copied()
            .filter(|&area| {
                world
                    .get::<crate::ecs::components::AreaCore>(area)
                    .is_some_and(|core| core.environment == species.best_environment)
                    && world
                        .get::<InRegion>(area)
                        .and_then(|r| world.get::<crate::ecs::components::RegionCore>(r.0))
                        .is_some_and(|core| !core.id.is_ocean())
            })
            .collect();
        if targets.is_empty() {
            warn!(species = seed.species.0, "no suitable area to seed species");
            continue;
        }
        let share = seed.amount / targets.len() as u32;
        world.resource_scope::<WorldgenRng, ()>(|world, mut rng| {
            for area in targets {
                let jitter = rng.0.random_range(-5..=5i64);
                let amount = (share as i64 * (100 + jitter) / 100).max(0) as u32;
                if let Some(mut pop) = world.get_mut::<AreaPopulation>(area) {
                    pop.set_amount(seed.species, amount);
                    pop.snapshot();
                }
            }
        });
    }
}
