mod common;

use common::*;
use ecosim::ecs::components::{ConcernedSpecies, RegionSurvey};
use ecosim::ecs::resources::{LogKind, SimConfig};
use ecosim::model::Axial;
use ecosim::worldgen::{AreaBlueprint, RegionBlueprint, WorldBlueprint};
use ecosim::{AreaId, RegionId, Simulation};

// ---------------------------------------------------------------------------
// The survey cycle
// ---------------------------------------------------------------------------

#[test]
fn six_power_seconds_survey_all_five_areas_with_nothing_left_over() {
    let mut sim = sim();
    let north = sim.region(NORTH).unwrap();
    sim.set_base_area(north, area(&sim, 0, 0));
    // One concerned species raises the per-area cost to 1.0 + 0.2
    sim.world_mut()
        .get_mut::<ConcernedSpecies>(north)
        .unwrap()
        .0 = vec![GRAZER];

    // Base power 2.0 for three one-second frames: 6.0 power-seconds against
    // a 1.2 cost covers exactly the region's five areas.
    for _ in 0..3 {
        sim.advance_frame(1.0, 1.0);
    }

    assert_eq!(sim.log().of_kind(LogKind::AreaSurveyed).count(), 5);
    let survey = sim.world().get::<RegionSurvey>(north).unwrap();
    assert_eq!(survey.progress, 0.0);
    assert_eq!(survey.surveyed_count, 0, "counter resets at the area count");
    assert_eq!(survey.cycles_completed, 1);
    assert_eq!(sim.survey_ratio(north), 0.0);

    // Every area of the region was visited exactly once
    for (q, r) in [(0, 0), (1, 0), (0, 1), (1, -1), (-1, 1)] {
        let a = area(&sim, q, r);
        assert_eq!(
            ecosim::ecs::queries::area_survey_count(sim.world(), a),
            1,
            "area at ({q}, {r})"
        );
    }
}

#[test]
fn partial_progress_carries_over_between_frames() {
    let mut sim = sim();
    let north = sim.region(NORTH).unwrap();
    sim.set_base_area(north, area(&sim, 0, 0));

    // Cost is 1.0; a half-second frame at power 2 banks exactly one area
    sim.advance_frame(0.25, 1.0);
    assert_eq!(sim.log().of_kind(LogKind::AreaSurveyed).count(), 0);
    assert_eq!(sim.survey_ratio(north), 0.0);

    sim.advance_frame(0.25, 1.0);
    assert_eq!(sim.log().of_kind(LogKind::AreaSurveyed).count(), 1);
    assert_eq!(sim.survey_ratio(north), 0.2);
}

#[test]
fn survey_is_dormant_without_a_base_and_under_pause() {
    let mut sim = sim();
    let north = sim.region(NORTH).unwrap();

    // No base: nothing accrues
    sim.advance_frame(10.0, 1.0);
    assert_eq!(sim.log().of_kind(LogKind::AreaSurveyed).count(), 0);

    // Base set but time paused: still nothing, and no day passes
    sim.set_base_area(north, area(&sim, 0, 0));
    sim.advance_frame(10.0, 0.0);
    assert_eq!(sim.log().of_kind(LogKind::AreaSurveyed).count(), 0);
    assert_eq!(sim.clock().day, 10);
}

#[test]
fn time_speed_scales_survey_power() {
    let mut sim = sim();
    let north = sim.region(NORTH).unwrap();
    sim.set_base_area(north, area(&sim, 0, 0));

    // 0.5 s at 3x is 3.0 power-seconds: three areas at cost 1.0
    sim.advance_frame(0.5, 3.0);
    assert_eq!(sim.log().of_kind(LogKind::AreaSurveyed).count(), 3);
}

// ---------------------------------------------------------------------------
// Basement bookkeeping
// ---------------------------------------------------------------------------

#[test]
fn base_and_basement_levels() {
    let mut sim = sim();
    let north = sim.region(NORTH).unwrap();
    assert_eq!(sim.basement_level(north), 0);

    // Raising before a base exists is a no-op
    sim.raise_basement_level(north);
    assert_eq!(sim.basement_level(north), 0);

    sim.set_base_area(north, area(&sim, 0, 0));
    assert_eq!(sim.basement_level(north), 1);
    sim.raise_basement_level(north);
    assert_eq!(sim.basement_level(north), 2);

    // An area of another region is rejected
    sim.set_base_area(north, area(&sim, 10, 0));
    let survey = sim.world().get::<RegionSurvey>(north).unwrap();
    assert_eq!(survey.spiral.center(), Axial::new(0, 0));
}

// ---------------------------------------------------------------------------
// Retry budget
// ---------------------------------------------------------------------------

#[test]
fn an_exhausted_spiral_resets_to_base_and_keeps_running() {
    // A region of two far-apart areas: after the first survey the spiral
    // wanders empty coordinates past the tiny retry budget.
    let blueprint = WorldBlueprint {
        regions: vec![RegionBlueprint {
            id: RegionId(1),
            name: "Gap".to_string(),
        }],
        areas: vec![
            AreaBlueprint {
                id: AreaId(1),
                environment: ecosim::EnvironmentType::Grassland,
                region: RegionId(1),
                coord: Axial::new(0, 0),
            },
            AreaBlueprint {
                id: AreaId(2),
                environment: ecosim::EnvironmentType::Grassland,
                region: RegionId(1),
                coord: Axial::new(6, 0),
            },
        ],
        links: vec![],
        initial_species: vec![],
        initial_factors: vec![],
    };
    let config = SimConfig {
        survey_retry_budget: 8,
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(config, species(), factor_types(), events(), &blueprint);
    let gap = sim.region(RegionId(1)).unwrap();
    let base = sim.area_at(Axial::new(0, 0)).unwrap();
    sim.set_base_area(gap, base);

    // 4.0 power-seconds: the base is surveyed on the first step, then the
    // budget runs out looking for the distant second area.
    sim.advance_frame(2.0, 1.0);
    assert_eq!(sim.log().of_kind(LogKind::AreaSurveyed).count(), 1);
    assert_eq!(sim.log().of_kind(LogKind::SurveyCursorReset).count(), 1);

    // The simulation is still alive: the reset cursor finds the base again
    sim.advance_frame(1.0, 1.0);
    assert!(sim.log().of_kind(LogKind::AreaSurveyed).count() >= 2);
}
