mod registries;
mod sim_log;
mod sim_resources;
mod specialists;

pub use registries::{EventLibrary, FactorTypeRegistry, SpeciesRegistry};
pub use sim_log::{LogEntry, LogKind, SimLog};
pub use sim_resources::{
    EcoIdGenerator, EventsRng, FactorsRng, GuideBoard, GuideLine, HiringRng, PendingEvents,
    PopulationRng, ResourcePool, SimConfig, SimRng, WorldgenRng, distribute_rng,
};
pub use specialists::{HirePool, Specialist, SpecialistRoster};
