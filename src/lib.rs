pub mod ecs;
pub mod id;
pub mod model;
pub mod worldgen;

pub use id::IdGenerator;
pub use model::{AreaId, EnvironmentType, RegionId, Season, SpeciesId};

pub use ecs::resources::SimConfig;
pub use ecs::sim::Simulation;
pub use worldgen::WorldBlueprint;
