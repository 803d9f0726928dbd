//! Shared fixtures for unit tests.

use crate::model::{EnvironmentPreference, EnvironmentType, FactorType, Species, SpeciesId};

/// Species 0: a producer. Needs nothing, yields 2 energy per unit.
pub fn grass() -> Species {
    Species {
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
    }
}

/// Species 1: a grazer eating species 0. Needs 2 energy, likes grassland at
/// half weight, thrives in wetland.
pub fn grazer() -> Species {
    Species {
        name: "Grazer".to_string(),
        description: String::new(),
        habitat_min_population: [10, 40, 90, 160, 250],
        best_environment: EnvironmentType::Wetland,
        environment_preferences: vec![EnvironmentPreference {
            environment: EnvironmentType::Grassland,
            weight: 0.5,
        }],
        prey: vec![SpeciesId(0)],
        energy_needs: 2,
        energy_as_food: 4,
        reproduction_rate: 1,
        migrate_limit: 5,
        temperature_range: (-5.0, 35.0),
        most_danger_limit: 100,
    }
}

/// A pollution-style factor: drifts down 5 per day, gone at the floor.
pub fn pollution() -> FactorType {
    FactorType {
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
    }
}
