use std::hash::{DefaultHasher, Hash, Hasher};

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;
use bevy_ecs::world::World;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::IdGenerator;
use crate::model::EventSpecId;

/// Simulation configuration.
#[derive(Resource, Debug, Clone)]
pub struct SimConfig {
    pub seed: u64,
    pub start_year: u32,
    /// Wall-clock seconds per game day at time speed 1.
    pub seconds_per_day: f64,
    /// Survey power a base provides before specialist levels are added.
    pub base_reservation_power: f64,
    /// How many spiral steps the survey may try before resetting the cursor.
    pub survey_retry_budget: u32,
    /// How many candidates a hire pool refresh produces.
    pub hire_list_size: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_year: 2021,
            seconds_per_day: 1.0,
            base_reservation_power: 2.0,
            survey_retry_budget: 512,
            hire_list_size: 5,
        }
    }
}

/// Deterministic RNG for the simulation.
#[derive(Resource)]
pub struct SimRng {
    pub rng: SmallRng,
    pub seed: u64,
}

// ---------------------------------------------------------------------------
// Per-domain RNG resources
// ---------------------------------------------------------------------------

macro_rules! domain_rng {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Resource)]
        pub struct $name(pub SmallRng);

        impl Default for $name {
            fn default() -> Self {
                Self(SmallRng::seed_from_u64(0))
            }
        }
    };
}

domain_rng!(PopulationRng, "Per-domain RNG for population systems.");
domain_rng!(FactorsRng, "Per-domain RNG for environmental factor systems.");
domain_rng!(EventsRng, "Per-domain RNG for event generation.");
domain_rng!(HiringRng, "Per-domain RNG for the specialist hire pool.");
domain_rng!(WorldgenRng, "Per-domain RNG for world building and seeding.");

/// Derive a deterministic per-domain seed from the global seed, domain name,
/// and day count.
fn derive_domain_seed(seed: u64, domain: &str, day: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    domain.hash(&mut hasher);
    day.hash(&mut hasher);
    hasher.finish()
}

/// Exclusive system that re-seeds all per-domain RNGs each day tick.
/// Runs in `SimPhase::PreUpdate` before any domain systems.
pub fn distribute_rng(world: &mut World) {
    let seed = world.resource::<SimRng>().seed;
    let day = world.resource::<crate::ecs::clock::GameClock>().day;

    macro_rules! reseed {
        ($res:ty, $label:expr) => {
            world.resource_mut::<$res>().0 =
                SmallRng::seed_from_u64(derive_domain_seed(seed, $label, day));
        };
    }

    reseed!(PopulationRng, "population");
    reseed!(FactorsRng, "factors");
    reseed!(EventsRng, "events");
    reseed!(HiringRng, "hiring");
    reseed!(WorldgenRng, "worldgen");
}

/// Global ID generator for log entries and specialists.
#[derive(Resource, Default)]
pub struct EcoIdGenerator(pub IdGenerator);

/// Player-facing balances: contribution credited by finished events and
/// stages, funds debited by specialist hiring.
#[derive(Resource, Debug, Clone, Default)]
pub struct ResourcePool {
    pub contribution: u64,
    pub funds: i64,
}

/// Event specs queued for generation (follow-ups of finished events, plus
/// anything the driver requests). Drained once per day tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct PendingEvents(pub Vec<EventSpecId>);

/// One guide line shown while a stage is open.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideLine {
    pub region: Entity,
    pub spec: EventSpecId,
    pub stage: usize,
    pub text: String,
}

/// The guide display: lines registered when stages appear, removed when they
/// finish.
#[derive(Resource, Debug, Clone, Default)]
pub struct GuideBoard {
    lines: Vec<GuideLine>,
}

impl GuideBoard {
    pub fn register(&mut self, line: GuideLine) {
        self.lines.push(line);
    }

    pub fn remove(&mut self, region: Entity, spec: EventSpecId, stage: usize) {
        self.lines
            .retain(|l| !(l.region == region && l.spec == spec && l.stage == stage));
    }

    pub fn lines(&self) -> &[GuideLine] {
        &self.lines
    }
}
