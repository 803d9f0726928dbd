use std::collections::BTreeMap;

use bevy_ecs::entity::Entity;
use bevy_ecs::message::MessageWriter;
use bevy_ecs::system::{Query, Res};

use crate::ecs::commands::SimCommand;
use crate::ecs::components::{AreaCore, AreaPopulation, RegionCore};
use crate::ecs::relationships::{AreaAdjacency, InRegion};
use crate::ecs::resources::SpeciesRegistry;
use crate::model::{AreaId, EnvironmentType, Species, SpeciesId};

/// Start-of-day view of one area, read-only for the whole pass.
struct AreaView {
    environment: EnvironmentType,
    snapshot: BTreeMap<SpeciesId, u32>,
}

/// Energy the area's prey stock could provide toward `wanted`, capped at
/// `wanted`. Reads the undepleted start-of-day stock.
fn providable_energy(
    view: &AreaView,
    registry: &SpeciesRegistry,
    species: &Species,
    wanted: u64,
) -> u64 {
    let mut available = 0u64;
    for &prey in &species.prey {
        let count = view.snapshot.get(&prey).copied().unwrap_or(0) as u64;
        let per_unit = registry.get(prey).map_or(0, |p| p.energy_as_food) as u64;
        available += count * per_unit;
        if available >= wanted {
            return wanted;
        }
    }
    available
}

/// Net dislike of an area for `amount` units of a species: hunger fraction
/// minus the environment preference weight. Unfindable food pushes it toward
/// 1; a liked environment pulls it down, unboundedly for strong preferences.
fn area_dislikeness(
    view: &AreaView,
    registry: &SpeciesRegistry,
    species: &Species,
    amount: u32,
) -> f32 {
    let mut dislikeness = 0.0f32;
    if species.energy_needs > 0 && amount > 0 {
        let wanted = amount as u64 * species.energy_needs as u64;
        let providable = providable_energy(view, registry, species, wanted);
        dislikeness += 1.0 - providable as f32 / wanted as f32;
    }
    // No explicit preference entry: the species' best environment still
    // counts as fully preferred, anything else as neutral.
    let weight = species.preference_for(view.environment).unwrap_or({
        if view.environment == species.best_environment {
            1.0
        } else {
            0.0
        }
    });
    dislikeness - weight
}

/// Daily growth and migration for every species on every area.
///
/// Walks areas in ascending `AreaId`, species in ascending `SpeciesId`. All
/// reads go against the start-of-day snapshot; all writes are emitted as
/// `SimCommand`s for the applicator, so one area's decisions never feed into
/// another's within the same day. Areas of the ocean region sit out the pass
/// entirely, both as homes and as migration destinations.
///
/// Runs in `DomainSet::Population`.
pub fn daily_population(
    registry: Res<SpeciesRegistry>,
    adjacency: Res<AreaAdjacency>,
    regions: Query<&RegionCore>,
    areas: Query<(Entity, &AreaCore, &InRegion, &AreaPopulation)>,
    mut commands: MessageWriter<SimCommand>,
) {
    let mut order: Vec<(AreaId, Entity)> = Vec::new();
    let mut views: BTreeMap<Entity, AreaView> = BTreeMap::new();
    for (entity, core, in_region, pop) in &areas {
        if regions.get(in_region.0).is_ok_and(|r| r.id.is_ocean()) {
            continue;
        }
        order.push((core.id, entity));
        views.insert(
            entity,
            AreaView {
                environment: core.environment,
                snapshot: pop.iter_previous().collect(),
            },
        );
    }
    order.sort_unstable_by_key(|&(id, _)| id);

    for &(_, entity) in &order {
        let view = &views[&entity];

        // Per-area food pool: each prey unit present at dawn contributes its
        // energy yield once, consumed in ascending predator order.
        let mut pool: BTreeMap<SpeciesId, u64> = view
            .snapshot
            .iter()
            .map(|(&id, &count)| {
                let per_unit = registry.get(id).map_or(0, |s| s.energy_as_food) as u64;
                (id, count as u64 * per_unit)
            })
            .collect();

        for (&species_id, &amount) in &view.snapshot {
            if amount == 0 {
                continue;
            }
            let Some(species) = registry.get(species_id) else {
                tracing::error!(species = species_id.0, "unregistered species on area");
                continue;
            };

            // Feeding and growth
            let fed = if species.energy_needs == 0 {
                amount
            } else {
                let mut consumed = 0u64;
                let mut wanted = amount as u64 * species.energy_needs as u64;
                for &prey in &species.prey {
                    if wanted == 0 {
                        break;
                    }
                    let supply = pool.entry(prey).or_insert(0);
                    let taken = wanted.min(*supply);
                    *supply -= taken;
                    consumed += taken;
                    wanted -= taken;
                }
                (consumed / species.energy_needs as u64) as u32
            };
            let growth = species.reproduction_rate as u64 * fed as u64;
            if growth > 0 {
                commands.write(SimCommand::ChangePopulation {
                    area: entity,
                    species: species_id,
                    delta: growth as i64,
                });
            }

            // Migration
            if species.migrate_limit == 0 {
                continue;
            }
            let dislikeness = area_dislikeness(view, &registry, species, amount);
            let volume = (amount as f32 * dislikeness)
                .trunc()
                .clamp(0.0, species.migrate_limit as f32) as u32;
            if volume == 0 {
                continue;
            }

            // First neighbor strictly under the acceptance bound wins ties;
            // neighbor lists are sorted, so the winner is stable.
            let mut best: Option<Entity> = None;
            let mut best_dislikeness = 1.0f32;
            for &neighbor in adjacency.neighbors(entity) {
                let Some(neighbor_view) = views.get(&neighbor) else {
                    continue;
                };
                let d = area_dislikeness(neighbor_view, &registry, species, volume);
                if d < best_dislikeness {
                    best_dislikeness = d;
                    best = Some(neighbor);
                }
            }
            if let Some(to) = best {
                commands.write(SimCommand::MigratePopulation {
                    from: entity,
                    to,
                    species: species_id,
                    count: volume,
                });
            }
        }
    }
}
