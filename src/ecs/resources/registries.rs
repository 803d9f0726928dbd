use bevy_ecs::resource::Resource;

use crate::model::{
    DangerLevel, EventSpec, EventSpecId, FactorType, FactorTypeId, Species, SpeciesId,
};

/// All species templates, indexed by `SpeciesId`, with danger threshold
/// tables precomputed at build.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpeciesRegistry {
    species: Vec<Species>,
    danger_tables: Vec<Vec<(u32, DangerLevel)>>,
}

impl SpeciesRegistry {
    pub fn new(species: Vec<Species>) -> Self {
        let danger_tables = species.iter().map(Species::danger_table).collect();
        Self {
            species,
            danger_tables,
        }
    }

    pub fn get(&self, id: SpeciesId) -> Option<&Species> {
        self.species.get(id.0)
    }

    /// Classify a population amount by walking the precomputed threshold
    /// table, safest row first. An amount at or above a row's threshold
    /// classifies at that row's level.
    pub fn danger_level(&self, id: SpeciesId, amount: u32) -> Option<DangerLevel> {
        let table = self.danger_tables.get(id.0)?;
        table
            .iter()
            .find(|(threshold, _)| amount >= *threshold)
            .or(table.last())
            .map(|&(_, level)| level)
    }
}

/// All factor type templates, indexed by `FactorTypeId`, with severity tier
/// tables precomputed at build.
#[derive(Resource, Debug, Clone, Default)]
pub struct FactorTypeRegistry {
    types: Vec<FactorType>,
    tier_tables: Vec<Vec<(f32, usize)>>,
}

impl FactorTypeRegistry {
    pub fn new(types: Vec<FactorType>) -> Self {
        let tier_tables = types.iter().map(FactorType::tier_table).collect();
        Self { types, tier_tables }
    }

    pub fn get(&self, id: FactorTypeId) -> Option<&FactorType> {
        self.types.get(id.0)
    }

    /// Severity description for a value, bucketed through the precomputed
    /// tier table (most severe first).
    pub fn description_for(&self, id: FactorTypeId, value: f32) -> Option<&str> {
        let ty = self.types.get(id.0)?;
        let table = self.tier_tables.get(id.0)?;
        let rate = ty.value_rate(value);
        table
            .iter()
            .find(|(threshold, _)| rate >= *threshold)
            .and_then(|&(_, label)| ty.tier_labels.get(label))
            .map(String::as_str)
    }
}

/// All narrative event templates, indexed by `EventSpecId`.
#[derive(Resource, Debug, Clone, Default)]
pub struct EventLibrary {
    specs: Vec<EventSpec>,
}

impl EventLibrary {
    pub fn new(specs: Vec<EventSpec>) -> Self {
        Self { specs }
    }

    pub fn get(&self, id: EventSpecId) -> Option<&EventSpec> {
        self.specs.get(id.0)
    }
}
