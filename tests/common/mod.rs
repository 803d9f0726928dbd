//! Shared world and content fixtures for integration tests.
//!
//! The map is two land regions plus an empty ocean region:
//!
//! North (id 1): areas 1-5 packed around the origin — two grassland, one
//! wetland, one forest, one desert. South (id 2): areas 6-8 around (10, 0).
//! The ocean region holds a single isolated area at (20, 0) that daily
//! logic must leave alone. Species 0 is a producer ("grass"), species 1 a
//! grazer that eats it, and species 2 a non-migrating wanderer.

#![allow(dead_code)]

use bevy_ecs::entity::Entity;
use ecosim::ecs::components::AreaPopulation;
use ecosim::ecs::resources::{EventLibrary, FactorTypeRegistry, SimConfig, SpeciesRegistry};
use ecosim::model::{
    AreaRequirement, Axial, EnvironmentPreference, EnvironmentType, EventSpec, EventSpecId,
    FactorType, FactorTypeId, Species, SpeciesId, StageCondition, StageSpec,
};
use ecosim::worldgen::{AreaBlueprint, RegionBlueprint, WorldBlueprint};
use ecosim::{AreaId, RegionId, Simulation};

pub const GRASS: SpeciesId = SpeciesId(0);
pub const GRAZER: SpeciesId = SpeciesId(1);
pub const WANDERER: SpeciesId = SpeciesId(2);
pub const DRIFTER: SpeciesId = SpeciesId(3);

pub const POLLUTION: FactorTypeId = FactorTypeId(0);
pub const BLOOM: FactorTypeId = FactorTypeId(1);
pub const NOISE: FactorTypeId = FactorTypeId(2);

pub const GRAZER_DECLINE: EventSpecId = EventSpecId(0);
pub const RECOVERY: EventSpecId = EventSpecId(1);
pub const IMPOSSIBLE: EventSpecId = EventSpecId(2);

pub const NORTH: RegionId = RegionId(1);
pub const SOUTH: RegionId = RegionId(2);

pub fn species() -> SpeciesRegistry {
    let grass = Species {
        name: "Grass".to_string(),
        description: String::new(),
        habitat_min_population: [50, 200, 450, 800, 1250],
        best_environment: EnvironmentType::Grassland,
        environment_preferences: vec![],
        prey: vec![],
        energy_needs: 0,
        energy_as_food: 2,
        reproduction_rate: 0,
        migrate_limit: 0,
        temperature_range: (-20.0, 45.0),
        most_danger_limit: 10_000,
    };
    let grazer = Species {
        name: "Grazer".to_string(),
        description: String::new(),
        habitat_min_population: [10, 40, 90, 160, 250],
        best_environment: EnvironmentType::Wetland,
        environment_preferences: vec![EnvironmentPreference {
            environment: EnvironmentType::Grassland,
            weight: 0.5,
        }],
        prey: vec![GRASS],
        energy_needs: 2,
        energy_as_food: 4,
        reproduction_rate: 1,
        migrate_limit: 5,
        temperature_range: (-5.0, 35.0),
        most_danger_limit: 100,
    };
    let wanderer = Species {
        name: "Wanderer".to_string(),
        description: String::new(),
        habitat_min_population: [10, 40, 90, 160, 250],
        best_environment: EnvironmentType::Wetland,
        environment_preferences: vec![],
        prey: vec![GRASS],
        energy_needs: 2,
        energy_as_food: 3,
        reproduction_rate: 0,
        migrate_limit: 0,
        temperature_range: (-5.0, 35.0),
        most_danger_limit: 100,
    };
    // Like the wanderer but willing to move; with no environment
    // preferences at all, every barren neighbor reads 1.0.
    let drifter = Species {
        name: "Drifter".to_string(),
        description: String::new(),
        habitat_min_population: [10, 40, 90, 160, 250],
        best_environment: EnvironmentType::Wetland,
        environment_preferences: vec![],
        prey: vec![GRASS],
        energy_needs: 2,
        energy_as_food: 3,
        reproduction_rate: 0,
        migrate_limit: 5,
        temperature_range: (-5.0, 35.0),
        most_danger_limit: 100,
    };
    SpeciesRegistry::new(vec![grass, grazer, wanderer, drifter])
}

pub fn factor_types() -> FactorTypeRegistry {
    let pollution = FactorType {
        name: "Water Pollution".to_string(),
        description: "Industrial runoff in local waterways.".to_string(),
        value_range: (0.0, 100.0),
        initial_value_range: (20.0, 60.0),
        day_value_change: -5.0,
        habitability_affect_rate: 0.3,
        remove_on_min: true,
        remove_on_max: false,
        tier_labels: vec![
            "trace".to_string(),
            "noticeable".to_string(),
            "severe".to_string(),
        ],
    };
    let bloom = FactorType {
        name: "Algal Bloom".to_string(),
        description: "Runaway algae choking the water.".to_string(),
        value_range: (0.0, 100.0),
        initial_value_range: (30.0, 50.0),
        day_value_change: 20.0,
        habitability_affect_rate: 0.5,
        remove_on_min: false,
        remove_on_max: true,
        tier_labels: vec!["mild".to_string(), "heavy".to_string()],
    };
    let noise = FactorType {
        name: "Noise".to_string(),
        description: "Construction noise.".to_string(),
        value_range: (0.0, 50.0),
        initial_value_range: (10.0, 20.0),
        day_value_change: 30.0,
        habitability_affect_rate: 0.1,
        remove_on_min: false,
        remove_on_max: false,
        tier_labels: vec!["faint".to_string(), "loud".to_string()],
    };
    FactorTypeRegistry::new(vec![pollution, bloom, noise])
}

pub fn events() -> EventLibrary {
    let north_only = vec![
        AreaRequirement {
            environment: EnvironmentType::Wetland,
            count: 1,
        },
        AreaRequirement {
            environment: EnvironmentType::Desert,
            count: 1,
        },
    ];
    let grazer_decline = EventSpec {
        name: "Grazer Decline".to_string(),
        description: "Grazers are vanishing from the wetlands.".to_string(),
        description_after_finish: "The grazers have recovered.".to_string(),
        area_requirements: north_only.clone(),
        concerned_species: GRAZER,
        habitat_count: 1,
        contribution: 50,
        stages: vec![
            StageSpec {
                name: "Polluted Waters".to_string(),
                description: "Something is poisoning the water.".to_string(),
                description_after_finish: "The water runs clear again.".to_string(),
                guide_text: "Track down the pollution source".to_string(),
                contribution: 10,
                prerequisites: vec![],
                appear_when: StageCondition::Always,
                finish_when: StageCondition::FactorCleared { factor: POLLUTION },
                related_factor: Some(POLLUTION),
                factor_spawn_count: 1,
            },
            StageSpec {
                name: "Repopulation".to_string(),
                description: "The grazers need numbers to come back.".to_string(),
                description_after_finish: String::new(),
                guide_text: String::new(),
                contribution: 20,
                prerequisites: vec![0],
                appear_when: StageCondition::Always,
                finish_when: StageCondition::RegionSpeciesAtLeast {
                    species: GRAZER,
                    amount: 5,
                },
                related_factor: None,
                factor_spawn_count: 0,
            },
        ],
        next_event: Some(RECOVERY),
    };
    let recovery = EventSpec {
        name: "Recovery".to_string(),
        description: "The wetland settles into a new balance.".to_string(),
        description_after_finish: "Balance restored.".to_string(),
        area_requirements: north_only,
        concerned_species: GRAZER,
        habitat_count: 1,
        contribution: 15,
        stages: vec![StageSpec {
            name: "Quiet Days".to_string(),
            description: "Nothing left to do but watch.".to_string(),
            description_after_finish: String::new(),
            guide_text: String::new(),
            contribution: 5,
            prerequisites: vec![],
            appear_when: StageCondition::Always,
            finish_when: StageCondition::Always,
            related_factor: None,
            factor_spawn_count: 0,
        }],
        next_event: None,
    };
    let impossible = EventSpec {
        name: "Glacier Watch".to_string(),
        description: "Needs tundra nobody has.".to_string(),
        description_after_finish: String::new(),
        area_requirements: vec![AreaRequirement {
            environment: EnvironmentType::Tundra,
            count: 10,
        }],
        concerned_species: GRAZER,
        habitat_count: 1,
        contribution: 0,
        stages: vec![],
        next_event: None,
    };
    EventLibrary::new(vec![grazer_decline, recovery, impossible])
}

pub fn blueprint() -> WorldBlueprint {
    let area = |id: u32, env: EnvironmentType, region: RegionId, q: i32, r: i32| AreaBlueprint {
        id: AreaId(id),
        environment: env,
        region,
        coord: Axial::new(q, r),
    };
    WorldBlueprint {
        regions: vec![
            RegionBlueprint {
                id: NORTH,
                name: "North".to_string(),
            },
            RegionBlueprint {
                id: SOUTH,
                name: "South".to_string(),
            },
            RegionBlueprint {
                id: RegionId::OCEAN,
                name: "Ocean".to_string(),
            },
        ],
        areas: vec![
            area(1, EnvironmentType::Grassland, NORTH, 0, 0),
            area(2, EnvironmentType::Grassland, NORTH, 1, 0),
            area(3, EnvironmentType::Wetland, NORTH, 0, 1),
            area(4, EnvironmentType::Forest, NORTH, 1, -1),
            area(5, EnvironmentType::Desert, NORTH, -1, 1),
            area(6, EnvironmentType::Grassland, SOUTH, 10, 0),
            area(7, EnvironmentType::Wetland, SOUTH, 11, 0),
            area(8, EnvironmentType::Forest, SOUTH, 10, 1),
            area(9, EnvironmentType::Grassland, RegionId::OCEAN, 20, 0),
        ],
        links: vec![
            (AreaId(1), AreaId(2)),
            (AreaId(1), AreaId(3)),
            (AreaId(1), AreaId(4)),
            (AreaId(1), AreaId(5)),
            (AreaId(2), AreaId(4)),
            (AreaId(6), AreaId(7)),
            (AreaId(6), AreaId(8)),
        ],
        initial_species: vec![],
        initial_factors: vec![],
    }
}

pub fn sim() -> Simulation {
    sim_with_config(SimConfig::default())
}

pub fn sim_with_config(config: SimConfig) -> Simulation {
    Simulation::new(config, species(), factor_types(), events(), &blueprint())
}

/// Area entity by its blueprint coordinate.
pub fn area(sim: &Simulation, q: i32, r: i32) -> Entity {
    sim.area_at(Axial::new(q, r)).expect("area exists")
}

/// Set a species count directly and snapshot it, as if it had been there at
/// dawn.
pub fn set_population(sim: &mut Simulation, area: Entity, species: SpeciesId, amount: u32) {
    let mut pop = sim
        .world_mut()
        .get_mut::<AreaPopulation>(area)
        .expect("area has populations");
    pop.set_amount(species, amount);
    pop.snapshot();
}
