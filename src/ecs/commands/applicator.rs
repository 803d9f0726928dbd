use bevy_ecs::message::Messages;
use bevy_ecs::world::World;
use tracing::error;

use crate::ecs::clock::GameClock;
use crate::ecs::components::{AreaCore, AreaPopulation};
use crate::ecs::resources::{EcoIdGenerator, LogEntry, LogKind, SimLog};

use super::SimCommand;

/// Exclusive system that drains all pending `SimCommand` messages and applies
/// them. Commands referencing despawned entities log an error and are
/// skipped; nothing aborts the tick.
///
/// Runs in `SimPhase::AreaCommit`.
pub fn apply_sim_commands(world: &mut World) {
    let commands: Vec<SimCommand> = {
        let Some(mut messages) = world.get_resource_mut::<Messages<SimCommand>>() else {
            return;
        };
        messages.drain().collect()
    };

    if commands.is_empty() {
        return;
    }

    let day = world.resource::<GameClock>().day;

    for cmd in commands {
        match cmd {
            SimCommand::ChangePopulation {
                area,
                species,
                delta,
            } => {
                let Some(mut pop) = world.get_mut::<AreaPopulation>(area) else {
                    error!(?area, ?species, delta, "population change targets a non-area");
                    continue;
                };
                pop.apply_delta(species, delta);
            }
            SimCommand::MigratePopulation {
                from,
                to,
                species,
                count,
            } => {
                let Some(source) = world.get::<AreaPopulation>(from) else {
                    error!(?from, ?species, "migration source is not an area");
                    continue;
                };
                // Other commands may have drained the source since the
                // snapshot; never move more than it holds now.
                let moved = count.min(source.amount(species));
                if moved == 0 {
                    continue;
                }
                if world.get::<AreaPopulation>(to).is_none() {
                    error!(?to, ?species, "migration destination is not an area");
                    continue;
                }
                if let Some(mut pop) = world.get_mut::<AreaPopulation>(from) {
                    pop.apply_delta(species, -(moved as i64));
                }
                if let Some(mut pop) = world.get_mut::<AreaPopulation>(to) {
                    pop.apply_delta(species, moved as i64);
                }

                let from_id = world.get::<AreaCore>(from).map(|c| c.id);
                let to_id = world.get::<AreaCore>(to).map(|c| c.id);
                let id = world.resource_mut::<EcoIdGenerator>().0.next_id();
                world.resource_mut::<SimLog>().push(LogEntry {
                    id,
                    day,
                    kind: LogKind::Migration,
                    message: format!("{moved} units of species {} migrated", species.0),
                    data: serde_json::json!({
                        "species": species.0,
                        "count": moved,
                        "from": from_id.map(|a| a.0),
                        "to": to_id.map(|a| a.0),
                    }),
                });
            }
        }
    }
}
