use bevy_app::App;
use bevy_ecs::message::MessageRegistry;
use bevy_ecs::schedule::IntoScheduleConfigs;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::clock::{FrameStep, GameClock};
use super::commands::{SimCommand, apply_sim_commands};
use super::relationships::{AreaAdjacency, AreaGrid, RegionIndex};
use super::resources::{
    EcoIdGenerator, EventLibrary, EventsRng, FactorTypeRegistry, FactorsRng, GuideBoard, HirePool,
    HiringRng, PendingEvents, PopulationRng, ResourcePool, SimConfig, SimLog, SimRng,
    SpeciesRegistry, SpecialistRoster, WorldgenRng, distribute_rng,
};
use super::schedule::{DomainSet, SimPhase, configure_day_schedule, configure_frame_schedule};
use super::systems::{
    daily_factor_drift, daily_population, evaluate_event_stages, frame_survey,
    generate_pending_events, snapshot_populations,
};

/// Build a headless Bevy app with the clock, core resources, message types,
/// and both simulation schedules.
///
/// Manual tick control:
/// ```no_run
/// # use ecosim::ecs::{build_sim_app, DayTick};
/// # use ecosim::ecs::resources::SimConfig;
/// let mut app = build_sim_app(SimConfig::default());
/// for _ in 0..360 {  // one game year of day ticks
///     app.world_mut().run_schedule(DayTick);
/// }
/// ```
pub fn build_sim_app(config: SimConfig) -> App {
    let mut app = App::empty();

    let seed = config.seed;
    app.insert_resource(GameClock::new(config.start_year, config.seconds_per_day));
    app.insert_resource(FrameStep::default());
    app.insert_resource(SimLog::default());
    app.insert_resource(EcoIdGenerator::default());
    app.insert_resource(ResourcePool::default());
    app.insert_resource(PendingEvents::default());
    app.insert_resource(GuideBoard::default());
    app.insert_resource(SpecialistRoster::default());
    app.insert_resource(HirePool::default());
    app.insert_resource(AreaAdjacency::new());
    app.insert_resource(AreaGrid::default());
    app.insert_resource(RegionIndex::default());
    app.insert_resource(SpeciesRegistry::default());
    app.insert_resource(FactorTypeRegistry::default());
    app.insert_resource(EventLibrary::default());
    app.insert_resource(SimRng {
        rng: SmallRng::seed_from_u64(seed),
        seed,
    });
    app.insert_resource(config);

    // Per-domain RNG resources (reseeded each day tick by distribute_rng)
    app.init_resource::<PopulationRng>();
    app.init_resource::<FactorsRng>();
    app.init_resource::<EventsRng>();
    app.init_resource::<HiringRng>();
    app.init_resource::<WorldgenRng>();

    MessageRegistry::register_message::<SimCommand>(app.world_mut());

    let mut day = configure_day_schedule();
    day.add_systems(bevy_ecs::message::message_update_system.in_set(SimPhase::PreUpdate));
    day.add_systems(distribute_rng.in_set(SimPhase::PreUpdate));
    day.add_systems(snapshot_populations.in_set(SimPhase::PreUpdate));
    day.add_systems(daily_population.in_set(DomainSet::Population));
    day.add_systems(daily_factor_drift.in_set(DomainSet::Environment));
    day.add_systems(apply_sim_commands.in_set(SimPhase::AreaCommit));
    day.add_systems(
        (generate_pending_events, evaluate_event_stages)
            .chain()
            .in_set(DomainSet::Events),
    );
    app.add_schedule(day);

    let mut frame = configure_frame_schedule();
    frame.add_systems(frame_survey);
    app.add_schedule(frame);

    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::schedule::DayTick;

    #[test]
    fn app_builds_without_panic() {
        let _app = build_sim_app(SimConfig::default());
    }

    #[test]
    fn day_tick_advances_the_clock() {
        let mut app = build_sim_app(SimConfig::default());
        for _ in 0..45 {
            app.world_mut().run_schedule(DayTick);
        }
        let clock = app.world().resource::<GameClock>();
        assert_eq!(clock.day, 45);
        assert_eq!(clock.month(), 2);
        assert_eq!(clock.day_of_month(), 16);
    }
}
