pub mod applicator;

use bevy_ecs::entity::Entity;
use bevy_ecs::message::Message;

use crate::model::SpeciesId;

pub use applicator::apply_sim_commands;

/// A command describing an intended population change.
///
/// Area systems read the start-of-day snapshot and emit these via
/// `MessageWriter<SimCommand>`; the centralized applicator in
/// `SimPhase::AreaCommit` applies them all at once. Deferring the writes is
/// what makes the daily pass independent of area iteration order.
#[derive(Message, Clone, Debug)]
pub enum SimCommand {
    /// Adjust one species count on one area. Saturates at zero.
    ChangePopulation {
        area: Entity,
        species: SpeciesId,
        delta: i64,
    },
    /// Move units between two areas atomically: both endpoints change in the
    /// same application, capped by what the source actually holds.
    MigratePopulation {
        from: Entity,
        to: Entity,
        species: SpeciesId,
        count: u32,
    },
}
