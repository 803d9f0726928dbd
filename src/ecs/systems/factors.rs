use bevy_ecs::entity::Entity;
use bevy_ecs::system::{Query, Res, ResMut};
use bevy_ecs::world::World;
use rand::Rng;
use rand::rngs::SmallRng;

use crate::ecs::clock::GameClock;
use crate::ecs::components::{AreaCore, AreaFactors, FactorInstance, RegionCore};
use crate::ecs::relationships::{InRegion, RegionMembers};
use crate::ecs::resources::{EcoIdGenerator, FactorTypeRegistry, LogEntry, LogKind, SimLog};
use crate::model::{FactorType, FactorTypeId};

use super::unique_random_picks;

/// Apply the daily drift to every live factor instance.
///
/// Each instance moves by its type's `day_value_change` and is clamped to the
/// legal range. Landing on a boundary whose removal flag is set destroys the
/// instance for good. Ocean-region areas are skipped.
///
/// Runs in `DomainSet::Environment`.
pub fn daily_factor_drift(
    registry: Res<FactorTypeRegistry>,
    clock: Res<GameClock>,
    mut id_gen: ResMut<EcoIdGenerator>,
    mut log: ResMut<SimLog>,
    regions: Query<&RegionCore>,
    mut areas: Query<(Entity, &AreaCore, &InRegion, &mut AreaFactors)>,
) {
    let mut order: Vec<(crate::model::AreaId, Entity)> = areas
        .iter()
        .filter(|(_, _, in_region, _)| !regions.get(in_region.0).is_ok_and(|r| r.id.is_ocean()))
        .map(|(entity, core, _, _)| (core.id, entity))
        .collect();
    order.sort_unstable_by_key(|&(id, _)| id);

    for &(area_id, entity) in &order {
        let Ok((_, _, _, mut factors)) = areas.get_mut(entity) else {
            continue;
        };
        let mut destroyed: Vec<FactorTypeId> = Vec::new();
        for instance in factors.iter_mut() {
            let Some(ty) = registry.get(instance.kind) else {
                tracing::error!(kind = instance.kind.0, "unregistered factor type on area");
                continue;
            };
            let (min, max) = ty.value_range;
            instance.value = (instance.value + ty.day_value_change).clamp(min, max);
            let at_min = instance.value <= min;
            let at_max = instance.value >= max;
            if (at_min && ty.remove_on_min) || (at_max && ty.remove_on_max) {
                destroyed.push(instance.kind);
            }
        }
        for kind in destroyed {
            factors.detach(kind);
            let name = registry.get(kind).map_or("", |t| t.name.as_str());
            log.push(LogEntry {
                id: id_gen.0.next_id(),
                day: clock.day,
                kind: LogKind::FactorDestroyed,
                message: format!("{name} has subsided"),
                data: serde_json::json!({ "factor": kind.0, "area": area_id.0 }),
            });
        }
    }
}

/// Attach a fresh instance of `kind` to `factors`, drawing its value from
/// the type's initial range. Returns false when the type is already present.
pub fn attach_new_instance(
    factors: &mut AreaFactors,
    ty: &FactorType,
    kind: FactorTypeId,
    rng: &mut SmallRng,
) -> bool {
    if factors.contains(kind) {
        return false;
    }
    let (lo, hi) = ty.initial_value_range;
    let value = if hi > lo { rng.random_range(lo..hi) } else { lo };
    factors.attach(FactorInstance::new(kind, value))
}

/// Seed up to `count` instances of a factor type across distinct random
/// areas of a region. Areas already carrying the type are skipped; returns
/// how many instances were actually attached.
pub fn spawn_factors_in_region(
    world: &mut World,
    region: Entity,
    kind: FactorTypeId,
    count: usize,
    rng: &mut SmallRng,
) -> usize {
    let Some(ty) = world
        .get_resource::<FactorTypeRegistry>()
        .and_then(|r| r.get(kind).cloned())
    else {
        tracing::error!(kind = kind.0, "cannot spawn an unregistered factor type");
        return 0;
    };
    let Some(members) = world.get::<RegionMembers>(region) else {
        tracing::error!(?region, "factor spawn targets a non-region");
        return 0;
    };
    let candidates: Vec<Entity> = members
        .iter()
        .copied()
        .filter(|&area| {
            world
                .get::<AreaFactors>(area)
                .is_some_and(|f| !f.contains(kind))
        })
        .collect();

    let mut spawned = 0;
    for area in unique_random_picks(rng, &candidates, count) {
        if let Some(mut factors) = world.get_mut::<AreaFactors>(area)
            && attach_new_instance(&mut factors, &ty, kind, rng)
        {
            spawned += 1;
        }
    }
    spawned
}
