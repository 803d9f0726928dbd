use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;
use rand::Rng;
use tracing::error;

use crate::ecs::clock::GameClock;
use crate::ecs::components::RegionBase;
use crate::ecs::resources::{
    EcoIdGenerator, HirePool, HiringRng, LogEntry, LogKind, ResourcePool, SimConfig, SimLog,
    Specialist, SpecialistRoster,
};

const CANDIDATE_NAMES: [&str; 8] = [
    "Ada", "Bruno", "Chen", "Dara", "Elif", "Felix", "Greta", "Hana",
];

/// Rebuild the hire pool with freshly generated candidates (levels 1-3,
/// names cycled from a fixed pool).
pub fn refresh_hire_pool(world: &mut World) {
    let size = world.resource::<SimConfig>().hire_list_size;
    let mut candidates = Vec::with_capacity(size);
    world.resource_scope::<HiringRng, ()>(|world, mut rng| {
        let mut id_gen = world.resource_mut::<EcoIdGenerator>();
        for _ in 0..size {
            let level = rng.0.random_range(1..=3);
            let name = CANDIDATE_NAMES[rng.0.random_range(0..CANDIDATE_NAMES.len())];
            candidates.push(Specialist {
                id: id_gen.0.next_id(),
                name: name.to_string(),
                level,
                area: None,
            });
        }
    });
    world.resource_mut::<HirePool>().candidates = candidates;
}

/// Hire a candidate from the pool and station them at a region's base area.
///
/// A candidate missing from the pool, insufficient funds, or a region without
/// an established base all log and leave everything unchanged.
pub fn hire_specialist(world: &mut World, candidate_id: u64, region: Entity) -> bool {
    let day = world.resource::<GameClock>().day;

    let Some(candidate) = world
        .resource::<HirePool>()
        .candidates
        .iter()
        .find(|s| s.id == candidate_id)
        .cloned()
    else {
        error!(candidate_id, "hire candidate is not in the pool");
        log_hire_failure(world, day, candidate_id, "not in the pool");
        return false;
    };
    let Some(base_area) = world
        .get::<RegionBase>(region)
        .and_then(|base| base.base_area)
    else {
        error!(?region, "cannot hire into a region without a base");
        log_hire_failure(world, day, candidate_id, "region has no base");
        return false;
    };
    let cost = candidate.cost();
    if world.resource::<ResourcePool>().funds < cost {
        error!(candidate_id, cost, "insufficient funds to hire");
        log_hire_failure(world, day, candidate_id, "insufficient funds");
        return false;
    }

    world.resource_mut::<ResourcePool>().funds -= cost;
    let mut hired = world
        .resource_mut::<HirePool>()
        .take(candidate_id)
        .unwrap_or(candidate);
    hired.area = Some(base_area);
    let message = format!("{} (level {}) hired", hired.name, hired.level);
    world.resource_mut::<SpecialistRoster>().specialists.push(hired);

    let id = world.resource_mut::<EcoIdGenerator>().0.next_id();
    world.resource_mut::<SimLog>().push(LogEntry {
        id,
        day,
        kind: LogKind::SpecialistHired,
        message,
        data: serde_json::json!({ "candidate": candidate_id, "cost": cost }),
    });
    true
}

fn log_hire_failure(world: &mut World, day: u64, candidate_id: u64, reason: &str) {
    let id = world.resource_mut::<EcoIdGenerator>().0.next_id();
    world.resource_mut::<SimLog>().push(LogEntry {
        id,
        day,
        kind: LogKind::HireFailed,
        message: format!("hire failed: {reason}"),
        data: serde_json::json!({ "candidate": candidate_id, "reason": reason }),
    });
}
