use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, ScheduleLabel, SystemSet};

use super::clock::advance_day;

/// Schedule label for the daily simulation tick.
/// Run manually once per crossed day boundary via
/// `app.world_mut().run_schedule(DayTick)`.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct DayTick;

/// Schedule label for the per-frame tick (clock-scaled continuous processes
/// such as region surveying).
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameTick;

/// Ordered phases within each day tick.
///
/// Phases run in declaration order:
/// PreUpdate < Areas < AreaCommit < Regions < Last.
/// Area-scoped systems emit commands during `Areas`; the applicator in
/// `AreaCommit` applies them all at once, so region-scoped systems in
/// `Regions` read fully settled area state.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimPhase {
    PreUpdate,
    Areas,
    AreaCommit,
    Regions,
    Last,
}

/// Per-domain system sets.
///
/// `Population` and `Environment` live in `SimPhase::Areas` and run in that
/// order; `Events` lives in `SimPhase::Regions`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomainSet {
    Population,
    Environment,
    Events,
}

/// Build a configured `DayTick` schedule with phase ordering.
///
/// Always single-threaded: the day tick guarantees a deterministic
/// area-before-region system order regardless of data access.
pub fn configure_day_schedule() -> Schedule {
    let mut schedule = Schedule::new(DayTick);
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.configure_sets(
        (
            SimPhase::PreUpdate,
            SimPhase::Areas,
            SimPhase::AreaCommit,
            SimPhase::Regions,
            SimPhase::Last,
        )
            .chain(),
    );
    schedule.configure_sets(DomainSet::Population.in_set(SimPhase::Areas));
    schedule.configure_sets(DomainSet::Environment.in_set(SimPhase::Areas));
    schedule.configure_sets(DomainSet::Environment.after(DomainSet::Population));
    schedule.configure_sets(DomainSet::Events.in_set(SimPhase::Regions));
    schedule.add_systems(advance_day.in_set(SimPhase::Last));
    schedule
}

/// Build a configured `FrameTick` schedule.
pub fn configure_frame_schedule() -> Schedule {
    let mut schedule = Schedule::new(FrameTick);
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule
}
