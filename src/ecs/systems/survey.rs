use std::collections::BTreeMap;

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;
use tracing::{error, warn};

use crate::ecs::clock::{FrameStep, GameClock};
use crate::ecs::components::{AreaCore, AreaFactors, ConcernedSpecies, RegionBase, RegionSurvey};
use crate::ecs::relationships::{AreaGrid, InRegion, RegionIndex, RegionMembers};
use crate::ecs::resources::{
    EcoIdGenerator, LogEntry, LogKind, SimConfig, SimLog, SpecialistRoster,
};

const EPSILON: f64 = 1e-9;

/// Per-frame survey progress for every region with an established base.
///
/// Power is the base's reservation power plus the levels of all specialists
/// stationed in the region, scaled by time speed. Whenever accumulated
/// progress covers the per-area cost, the spiral cursor advances until it
/// lands on an area of this region (bounded by the retry budget) and that
/// area is surveyed; the remainder carries over to the next area.
///
/// Runs in the frame tick.
pub fn frame_survey(world: &mut World) {
    let step = *world.resource::<FrameStep>();
    if step.delta_time <= 0.0 || step.time_speed <= 0.0 {
        return;
    }
    let config = world.resource::<SimConfig>().clone();
    let day = world.resource::<GameClock>().day;

    // Specialist survey power, grouped by the region their area belongs to.
    let mut specialist_power: BTreeMap<Entity, f64> = BTreeMap::new();
    for specialist in &world.resource::<SpecialistRoster>().specialists {
        let Some(area) = specialist.area else {
            continue;
        };
        if let Some(in_region) = world.get::<InRegion>(area) {
            *specialist_power.entry(in_region.0).or_default() += specialist.level as f64;
        }
    }

    let regions: Vec<Entity> = world
        .resource::<RegionIndex>()
        .iter()
        .map(|(_, entity)| entity)
        .collect();

    for region in regions {
        let Some(base) = world.get::<RegionBase>(region) else {
            continue;
        };
        let Some(base_area) = base.base_area else {
            continue;
        };
        let area_count = world.get::<RegionMembers>(region).map_or(0, |m| m.len());
        if area_count == 0 {
            continue;
        }
        let concerned = world
            .get::<ConcernedSpecies>(region)
            .map_or(0, |c| c.0.len());
        let power = config.base_reservation_power
            + specialist_power.get(&region).copied().unwrap_or(0.0);

        let Some(survey) = world.get::<RegionSurvey>(region) else {
            continue;
        };
        let cost = survey.reservation_time + 0.2 * concerned as f64;
        let mut progress = survey.progress + power * step.time_speed * step.delta_time;
        let mut spiral = survey.spiral.clone();
        let mut surveyed_count = survey.surveyed_count;
        let mut cycles_completed = survey.cycles_completed;

        while cost > 0.0 && progress + EPSILON >= cost {
            progress = (progress - cost).max(0.0);

            // Walk the spiral until it yields an area of this region.
            let mut found: Option<Entity> = None;
            for _ in 0..config.survey_retry_budget {
                let coord = spiral.next();
                let Some(area) = world.resource::<AreaGrid>().get(coord) else {
                    continue;
                };
                if world.get::<InRegion>(area).is_some_and(|r| r.0 == region) {
                    found = Some(area);
                    break;
                }
            }

            let Some(area) = found else {
                warn!(?region, "survey spiral exhausted its retry budget");
                if let Some(core) = world.get::<AreaCore>(base_area) {
                    spiral.set_center(core.coord);
                }
                let id = world.resource_mut::<EcoIdGenerator>().0.next_id();
                world.resource_mut::<SimLog>().push(LogEntry {
                    id,
                    day,
                    kind: LogKind::SurveyCursorReset,
                    message: "survey cursor lost its way and returned to base".to_string(),
                    data: serde_json::Value::Null,
                });
                break;
            };

            let area_id = {
                let Some(mut core) = world.get_mut::<AreaCore>(area) else {
                    continue;
                };
                core.survey_count += 1;
                core.id
            };
            // Surveying an area uncovers whatever factors sit on it.
            if let Some(mut factors) = world.get_mut::<AreaFactors>(area) {
                for instance in factors.iter_mut() {
                    instance.revealed = true;
                }
            }
            let id = world.resource_mut::<EcoIdGenerator>().0.next_id();
            world.resource_mut::<SimLog>().push(LogEntry {
                id,
                day,
                kind: LogKind::AreaSurveyed,
                message: format!("area {} surveyed", area_id.0),
                data: serde_json::json!({ "area": area_id.0 }),
            });

            surveyed_count += 1;
            if surveyed_count >= area_count {
                surveyed_count = 0;
                cycles_completed += 1;
                if let Some(core) = world.get::<AreaCore>(base_area) {
                    spiral.set_center(core.coord);
                }
            }
        }

        if let Some(mut survey) = world.get_mut::<RegionSurvey>(region) {
            survey.progress = progress;
            survey.spiral = spiral;
            survey.surveyed_count = surveyed_count;
            survey.cycles_completed = cycles_completed;
        }
    }
}

/// Establish (or move) a region's base of operations. The basement starts at
/// level 1 and the survey process restarts from the base area's coordinate.
/// The area must belong to the region; anything else logs an error and
/// changes nothing.
pub fn set_base_area(world: &mut World, region: Entity, area: Entity) {
    if !world.get::<InRegion>(area).is_some_and(|r| r.0 == region) {
        error!(?region, ?area, "base area must belong to its region");
        return;
    }
    let Some(coord) = world.get::<AreaCore>(area).map(|c| c.coord) else {
        error!(?area, "base target is not an area");
        return;
    };
    let Some(mut base) = world.get_mut::<RegionBase>(region) else {
        error!(?region, "base target is not a region");
        return;
    };
    base.base_area = Some(area);
    base.basement_level = base.basement_level.max(1);
    if let Some(mut survey) = world.get_mut::<RegionSurvey>(region) {
        survey.spiral.set_center(coord);
        survey.surveyed_count = 0;
        survey.progress = 0.0;
    }
}

/// Raise a region's basement level by one. Requires an established base.
pub fn raise_basement_level(world: &mut World, region: Entity) {
    let Some(mut base) = world.get_mut::<RegionBase>(region) else {
        error!(?region, "basement target is not a region");
        return;
    };
    if !base.is_established() {
        error!(?region, "cannot raise a basement before a base exists");
        return;
    }
    base.basement_level += 1;
}
