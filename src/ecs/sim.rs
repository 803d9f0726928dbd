use bevy_app::App;
use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::app::build_sim_app;
use crate::ecs::clock::{FrameStep, GameClock};
use crate::ecs::queries::{self, EventReport};
use crate::ecs::relationships::{AreaGrid, RegionIndex};
use crate::ecs::resources::{
    EventLibrary, FactorTypeRegistry, ResourcePool, SimConfig, SimLog, SpeciesRegistry,
};
use crate::ecs::schedule::{DayTick, FrameTick};
use crate::ecs::systems::{raise_basement_level, set_base_area, try_generate_event};
use crate::ecs::{specialists, systems};
use crate::model::{DangerLevel, EventSpecId, FactorTypeId, RegionId, SpeciesId};
use crate::worldgen::{WorldBlueprint, build_world};

/// The simulation facade: owns the ECS app and exposes the tick drivers,
/// the player operations, and the read-only query surface.
pub struct Simulation {
    app: App,
}

impl Simulation {
    /// Build a simulation from content registries and a world blueprint.
    pub fn new(
        config: SimConfig,
        species: SpeciesRegistry,
        factor_types: FactorTypeRegistry,
        events: EventLibrary,
        blueprint: &WorldBlueprint,
    ) -> Self {
        let mut app = build_sim_app(config);
        app.insert_resource(species);
        app.insert_resource(factor_types);
        app.insert_resource(events);
        build_world(app.world_mut(), blueprint);
        Self { app }
    }

    // -- tick drivers -------------------------------------------------------

    /// Run the day tick once: population, factor drift, events, clock.
    pub fn advance_day(&mut self) {
        self.app.world_mut().run_schedule(DayTick);
    }

    /// Advance one rendered frame: survey progress accrues, and the day tick
    /// runs once per day boundary the scaled time crossed. A time speed of
    /// zero pauses everything.
    pub fn advance_frame(&mut self, delta_time: f64, time_speed: f64) {
        let world = self.app.world_mut();
        *world.resource_mut::<FrameStep>() = FrameStep {
            delta_time,
            time_speed,
        };
        world.run_schedule(FrameTick);
        let crossings = world
            .resource_mut::<GameClock>()
            .accumulate(delta_time, time_speed);
        for _ in 0..crossings {
            self.advance_day();
        }
    }

    // -- player operations --------------------------------------------------

    /// Try to generate an event; returns the region it bound to.
    pub fn generate_event(&mut self, spec: EventSpecId) -> Option<Entity> {
        try_generate_event(self.app.world_mut(), spec)
    }

    pub fn set_base_area(&mut self, region: Entity, area: Entity) {
        set_base_area(self.app.world_mut(), region, area);
    }

    pub fn raise_basement_level(&mut self, region: Entity) {
        raise_basement_level(self.app.world_mut(), region);
    }

    pub fn refresh_hire_pool(&mut self) {
        specialists::refresh_hire_pool(self.app.world_mut());
    }

    pub fn hire_specialist(&mut self, candidate_id: u64, region: Entity) -> bool {
        specialists::hire_specialist(self.app.world_mut(), candidate_id, region)
    }

    /// Seed factor instances across a region, e.g. at world generation.
    pub fn spawn_factors_in_region(
        &mut self,
        region: Entity,
        kind: FactorTypeId,
        count: usize,
    ) -> usize {
        let world = self.app.world_mut();
        world.resource_scope::<crate::ecs::resources::WorldgenRng, usize>(|world, mut rng| {
            systems::spawn_factors_in_region(world, region, kind, count, &mut rng.0)
        })
    }

    // -- queries ------------------------------------------------------------

    pub fn region(&self, id: RegionId) -> Option<Entity> {
        self.app.world().resource::<RegionIndex>().get(id)
    }

    pub fn area_at(&self, coord: crate::model::Axial) -> Option<Entity> {
        self.app.world().resource::<AreaGrid>().get(coord)
    }

    pub fn species_amount_in_area(&self, area: Entity, species: SpeciesId) -> u32 {
        queries::species_amount_in_area(self.app.world(), area, species)
    }

    pub fn species_change_in_area(&self, area: Entity, species: SpeciesId) -> i64 {
        queries::species_change_in_area(self.app.world(), area, species)
    }

    pub fn species_amount_in_region(&self, region: Entity, species: SpeciesId) -> u64 {
        queries::species_amount_in_region(self.app.world(), region, species)
    }

    pub fn species_change_in_region(&self, region: Entity, species: SpeciesId) -> i64 {
        queries::species_change_in_region(self.app.world(), region, species)
    }

    pub fn species_danger_level(&self, species: SpeciesId) -> Option<DangerLevel> {
        queries::species_danger_level(self.app.world(), species)
    }

    pub fn revealed_factors(&self, area: Entity) -> Vec<(FactorTypeId, String)> {
        queries::revealed_factors(self.app.world(), area)
    }

    pub fn event_report(&self, region: Entity) -> Option<EventReport> {
        queries::event_report(self.app.world(), region)
    }

    pub fn survey_ratio(&self, region: Entity) -> f64 {
        queries::survey_ratio(self.app.world(), region)
    }

    pub fn basement_level(&self, region: Entity) -> u32 {
        queries::basement_level(self.app.world(), region)
    }

    pub fn clock(&self) -> &GameClock {
        self.app.world().resource::<GameClock>()
    }

    pub fn resource_pool(&self) -> &ResourcePool {
        self.app.world().resource::<ResourcePool>()
    }

    pub fn log(&self) -> &SimLog {
        self.app.world().resource::<SimLog>()
    }

    // -- escape hatches ----------------------------------------------------

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
