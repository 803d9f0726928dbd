use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;
use tracing::{error, warn};

use crate::ecs::clock::GameClock;
use crate::ecs::components::{
    ActiveEvent, AreaCore, AreaFactors, AreaPopulation, ConcernedSpecies, RegionCore, RegionSurvey,
    StageState,
};
use crate::ecs::relationships::{AreaAdjacency, InRegion, RegionIndex, RegionMembers};
use crate::ecs::resources::{
    EcoIdGenerator, EventLibrary, EventsRng, FactorTypeRegistry, GuideBoard, GuideLine, LogEntry,
    LogKind, PendingEvents, ResourcePool, SimLog, SpeciesRegistry,
};
use crate::model::{EventSpec, EventSpecId, FactorTypeId, SpeciesId, StageCondition};

use super::{attach_new_instance, unique_random_picks};

fn region_species_total(world: &World, region: Entity, species: SpeciesId) -> u64 {
    let Some(members) = world.get::<RegionMembers>(region) else {
        return 0;
    };
    members
        .iter()
        .filter_map(|&area| world.get::<AreaPopulation>(area))
        .map(|pop| pop.amount(species) as u64)
        .sum()
}

fn region_has_factor(world: &World, region: Entity, kind: FactorTypeId, revealed: bool) -> bool {
    let Some(members) = world.get::<RegionMembers>(region) else {
        return false;
    };
    members.iter().any(|&area| {
        world
            .get::<AreaFactors>(area)
            .and_then(|f| f.get(kind))
            .is_some_and(|instance| !revealed || instance.revealed)
    })
}

fn eval_condition(
    world: &World,
    region: Entity,
    state: &StageState,
    day: u64,
    condition: &StageCondition,
) -> bool {
    match condition {
        StageCondition::Always => true,
        StageCondition::Never => false,
        StageCondition::RegionSpeciesAtLeast { species, amount } => {
            region_species_total(world, region, *species) >= *amount as u64
        }
        StageCondition::RegionSpeciesAtMost { species, amount } => {
            region_species_total(world, region, *species) <= *amount as u64
        }
        StageCondition::FactorCleared { factor } => !region_has_factor(world, region, *factor, false),
        StageCondition::FactorRevealed { factor } => region_has_factor(world, region, *factor, true),
        StageCondition::SurveyCycleComplete => world
            .get::<RegionSurvey>(region)
            .is_some_and(|s| s.cycles_completed > 0),
        StageCondition::DaysSinceAppeared { days } => {
            state.appeared && day.saturating_sub(state.appeared_on_day) >= *days
        }
    }
}

fn push_log(world: &mut World, day: u64, kind: LogKind, message: String, data: serde_json::Value) {
    let id = world.resource_mut::<EcoIdGenerator>().0.next_id();
    world.resource_mut::<SimLog>().push(LogEntry {
        id,
        day,
        kind,
        message,
        data,
    });
}

/// Whether a region satisfies every minimum-environment-count requirement of
/// an event spec.
fn meets_area_requirements(world: &World, region: Entity, spec: &EventSpec) -> bool {
    let Some(members) = world.get::<RegionMembers>(region) else {
        return false;
    };
    spec.area_requirements.iter().all(|req| {
        members
            .iter()
            .filter_map(|&area| world.get::<AreaCore>(area))
            .filter(|core| core.environment == req.environment)
            .count()
            >= req.count
    })
}

/// Try to bind a new instance of the event spec to an eligible region.
///
/// Eligible regions are non-ocean, carry no active event, and satisfy every
/// area requirement; one is drawn uniformly at random. Returns the chosen
/// region, or `None` (with a logged warning and no state touched) when no
/// region qualifies.
pub fn try_generate_event(world: &mut World, spec_id: EventSpecId) -> Option<Entity> {
    let day = world.resource::<GameClock>().day;
    let Some(spec) = world
        .get_resource::<EventLibrary>()
        .and_then(|lib| lib.get(spec_id).cloned())
    else {
        error!(spec = spec_id.0, "unknown event spec requested");
        return None;
    };
    let Some(species) = world
        .get_resource::<SpeciesRegistry>()
        .and_then(|r| r.get(spec.concerned_species).cloned())
    else {
        error!(
            spec = spec_id.0,
            species = spec.concerned_species.0,
            "event spec names an unregistered species"
        );
        return None;
    };

    let candidates: Vec<Entity> = world
        .resource::<RegionIndex>()
        .iter()
        .filter(|(id, _)| !id.is_ocean())
        .map(|(_, entity)| entity)
        .filter(|&region| world.get::<ActiveEvent>(region).is_none())
        .filter(|&region| meets_area_requirements(world, region, &spec))
        .collect();

    if candidates.is_empty() {
        warn!(spec = spec_id.0, name = %spec.name, "no eligible region for event");
        push_log(
            world,
            day,
            LogKind::EventGenerationFailed,
            format!("no region can host \"{}\"", spec.name),
            serde_json::json!({ "spec": spec_id.0 }),
        );
        return None;
    }

    world.resource_scope::<EventsRng, Option<Entity>>(|world, mut rng| {
        use rand::Rng;

        let region = candidates[rng.0.random_range(0..candidates.len())];

        // Habitats: distinct random areas of the species' preferred
        // environment inside the region.
        let habitat_pool: Vec<Entity> = world
            .get::<RegionMembers>(region)
            .map(|members| {
                members
                    .iter()
                    .copied()
                    .filter(|&area| {
                        world
                            .get::<AreaCore>(area)
                            .is_some_and(|c| c.environment == species.best_environment)
                    })
                    .collect()
            })
            .unwrap_or_default();
        let habitats = unique_random_picks(&mut rng.0, &habitat_pool, spec.habitat_count);

        // Each stage seeds its related factor around every habitat, on
        // distinct neighbor areas that stay inside the region.
        for stage in &spec.stages {
            let Some(kind) = stage.related_factor else {
                continue;
            };
            let Some(ty) = world
                .resource::<FactorTypeRegistry>()
                .get(kind)
                .cloned()
            else {
                error!(kind = kind.0, "stage names an unregistered factor type");
                continue;
            };
            for &habitat in &habitats {
                let neighbors: Vec<Entity> = world
                    .resource::<AreaAdjacency>()
                    .neighbors(habitat)
                    .iter()
                    .copied()
                    .filter(|&area| {
                        world.get::<InRegion>(area).is_some_and(|r| r.0 == region)
                            && world
                                .get::<AreaFactors>(area)
                                .is_some_and(|f| !f.contains(kind))
                    })
                    .collect();
                for area in unique_random_picks(&mut rng.0, &neighbors, stage.factor_spawn_count) {
                    if let Some(mut factors) = world.get_mut::<AreaFactors>(area) {
                        attach_new_instance(&mut factors, &ty, kind, &mut rng.0);
                    }
                }
            }
        }

        world.entity_mut(region).insert(ActiveEvent::new(
            spec_id,
            spec.concerned_species,
            habitats,
            spec.stages.len(),
            day,
        ));
        if let Some(mut concerned) = world.get_mut::<ConcernedSpecies>(region) {
            concerned.0 = vec![spec.concerned_species];
        }
        Some(region)
    })
}

/// Exclusive system that drains the follow-up queue and tries to generate
/// each queued event spec.
///
/// Runs in `DomainSet::Events`, before stage evaluation, so an event queued
/// on day N appears in the world on day N+1 and evaluates from day N+1 on.
pub fn generate_pending_events(world: &mut World) {
    let pending = std::mem::take(&mut world.resource_mut::<PendingEvents>().0);
    for spec in pending {
        try_generate_event(world, spec);
    }
}

/// Exclusive system that advances every active event's stage machine by one
/// day.
///
/// Stages are visited in declaration order. A dormant stage appears when all
/// its prerequisites are finished and its appearance predicate holds; an
/// appeared stage finishes when its completion predicate holds. A stage makes
/// at most one transition per day, so one that appears today is first
/// eligible to finish tomorrow. Both marks are permanent. When the last
/// stage finishes the event itself finishes:
/// contribution is credited, the follow-up spec (if any) is queued, and the
/// region is released.
///
/// Runs in `DomainSet::Events`.
pub fn evaluate_event_stages(world: &mut World) {
    let day = world.resource::<GameClock>().day;
    let regions: Vec<Entity> = world
        .resource::<RegionIndex>()
        .iter()
        .map(|(_, entity)| entity)
        .filter(|&region| world.get::<ActiveEvent>(region).is_some())
        .collect();

    for region in regions {
        let Some(mut event) = world.get::<ActiveEvent>(region).cloned() else {
            continue;
        };
        let Some(spec) = world
            .resource::<EventLibrary>()
            .get(event.spec)
            .cloned()
        else {
            error!(spec = event.spec.0, "active event references an unknown spec");
            continue;
        };
        let region_name = world
            .get::<RegionCore>(region)
            .map(|c| c.name.clone())
            .unwrap_or_default();

        for (index, stage_spec) in spec.stages.iter().enumerate() {
            if !event.stages[index].appeared
                && event.prerequisites_met(&stage_spec.prerequisites)
                && eval_condition(world, region, &event.stages[index], day, &stage_spec.appear_when)
            {
                event.stages[index].appeared = true;
                event.stages[index].appeared_on_day = day;
                push_log(
                    world,
                    day,
                    LogKind::StageAppeared,
                    format!("{} — {}: {}", region_name, stage_spec.name, stage_spec.description),
                    serde_json::json!({ "spec": event.spec.0, "stage": index }),
                );
                if !stage_spec.guide_text.is_empty() {
                    world.resource_mut::<GuideBoard>().register(GuideLine {
                        region,
                        spec: event.spec,
                        stage: index,
                        text: stage_spec.guide_text.clone(),
                    });
                }
            } else if event.stages[index].appeared
                && !event.stages[index].finished
                && eval_condition(world, region, &event.stages[index], day, &stage_spec.finish_when)
            {
                event.stages[index].finished = true;
                let message = if stage_spec.description_after_finish.is_empty() {
                    format!("{} — {} resolved", region_name, stage_spec.name)
                } else {
                    format!(
                        "{} — {}: {}",
                        region_name, stage_spec.name, stage_spec.description_after_finish
                    )
                };
                push_log(
                    world,
                    day,
                    LogKind::StageFinished,
                    message,
                    serde_json::json!({ "spec": event.spec.0, "stage": index }),
                );
                world.resource_mut::<ResourcePool>().contribution += stage_spec.contribution as u64;
                world
                    .resource_mut::<GuideBoard>()
                    .remove(region, event.spec, index);
            }
        }

        let all_finished = event.stages.iter().all(|s| s.finished);
        if all_finished && !event.finished {
            event.finished = true;
            world.resource_mut::<ResourcePool>().contribution += spec.contribution as u64;
            push_log(
                world,
                day,
                LogKind::EventFinished,
                format!("{} — \"{}\" concluded", region_name, spec.name),
                serde_json::json!({ "spec": event.spec.0 }),
            );
            if let Some(next) = spec.next_event {
                world.resource_mut::<PendingEvents>().0.push(next);
            }
            if let Some(mut concerned) = world.get_mut::<ConcernedSpecies>(region) {
                concerned.0.clear();
            }
            // The region is free to host the next event.
            world.entity_mut(region).remove::<ActiveEvent>();
        } else if let Some(mut slot) = world.get_mut::<ActiveEvent>(region) {
            *slot = event;
        }
    }
}
