use bevy_ecs::system::Query;

use crate::ecs::components::AreaPopulation;

/// Capture every area's start-of-day population snapshot.
///
/// Runs in `SimPhase::PreUpdate`, before any daily system. All daily reads
/// go against this snapshot, so the pass is independent of area order.
pub fn snapshot_populations(mut areas: Query<&mut AreaPopulation>) {
    for mut pop in &mut areas {
        pop.snapshot();
    }
}
