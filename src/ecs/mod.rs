pub mod app;
pub mod clock;
pub mod commands;
pub mod components;
pub mod queries;
pub mod relationships;
pub mod resources;
pub mod schedule;
pub mod sim;
pub mod spawn;
pub mod specialists;
pub mod systems;

#[cfg(test)]
pub mod test_helpers;

pub use app::build_sim_app;
pub use clock::{FrameStep, GameClock};
pub use schedule::{DayTick, DomainSet, FrameTick, SimPhase};
pub use sim::Simulation;
