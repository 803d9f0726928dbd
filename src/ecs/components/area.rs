use std::collections::BTreeMap;

use bevy_ecs::component::Component;

use crate::model::{AreaId, Axial, EnvironmentType, FactorTypeId, SpeciesId};

/// Fixed identity of an area: stable id, environment classification, and the
/// axial coordinate the world builder assigned it. `survey_count` is the
/// only field that changes after setup.
#[derive(Component, Debug, Clone)]
pub struct AreaCore {
    pub id: AreaId,
    pub environment: EnvironmentType,
    pub coord: Axial,
    pub survey_count: u32,
}

impl AreaCore {
    pub fn new(id: AreaId, environment: EnvironmentType, coord: Axial) -> Self {
        Self {
            id,
            environment,
            coord,
            survey_count: 0,
        }
    }
}

/// Per-area species populations.
///
/// `counts` holds the live populations; `previous` is the start-of-day
/// snapshot taken before any daily system runs, powering both the
/// order-independent growth/migration reads and the day-over-day change
/// queries. BTreeMap for deterministic iteration.
#[derive(Component, Debug, Clone, Default)]
pub struct AreaPopulation {
    counts: BTreeMap<SpeciesId, u32>,
    previous: BTreeMap<SpeciesId, u32>,
}

impl AreaPopulation {
    /// Current population of a species. Absent entries read as zero.
    pub fn amount(&self, species: SpeciesId) -> u32 {
        self.counts.get(&species).copied().unwrap_or(0)
    }

    /// Population at the start of the current day.
    pub fn previous_amount(&self, species: SpeciesId) -> u32 {
        self.previous.get(&species).copied().unwrap_or(0)
    }

    /// Day-over-day change, current minus the start-of-day snapshot.
    pub fn change(&self, species: SpeciesId) -> i64 {
        self.amount(species) as i64 - self.previous_amount(species) as i64
    }

    /// Apply a signed delta, saturating at zero. Entries that reach zero are
    /// dropped so iteration only visits species actually present.
    pub fn apply_delta(&mut self, species: SpeciesId, delta: i64) {
        let current = self.amount(species) as i64;
        let next = (current + delta).max(0) as u32;
        if next == 0 {
            self.counts.remove(&species);
        } else {
            self.counts.insert(species, next);
        }
    }

    pub fn set_amount(&mut self, species: SpeciesId, amount: u32) {
        if amount == 0 {
            self.counts.remove(&species);
        } else {
            self.counts.insert(species, amount);
        }
    }

    /// Capture the start-of-day snapshot.
    pub fn snapshot(&mut self) {
        self.previous = self.counts.clone();
    }

    /// Live populations in ascending species order.
    pub fn iter(&self) -> impl Iterator<Item = (SpeciesId, u32)> + '_ {
        self.counts.iter().map(|(&id, &n)| (id, n))
    }

    /// Start-of-day snapshot in ascending species order.
    pub fn iter_previous(&self) -> impl Iterator<Item = (SpeciesId, u32)> + '_ {
        self.previous.iter().map(|(&id, &n)| (id, n))
    }
}

/// One live environmental factor on an area.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorInstance {
    pub kind: FactorTypeId,
    pub value: f32,
    pub revealed: bool,
    /// Total habitability discount this instance has handed out.
    pub cumulative_impact: f32,
}

impl FactorInstance {
    pub fn new(kind: FactorTypeId, value: f32) -> Self {
        Self {
            kind,
            value,
            revealed: false,
            cumulative_impact: 0.0,
        }
    }

    /// Habitability discount felt at `distance` hexes away, scaled by the
    /// factor type's affect rate. Accrues onto `cumulative_impact`.
    pub fn seek_affect(&mut self, affect_rate: f32, distance: u32) -> f32 {
        let affect = self.value * affect_rate / (distance + 1) as f32;
        self.cumulative_impact += affect;
        affect
    }
}

/// The environmental factors currently attached to an area, at most one
/// instance per factor type.
#[derive(Component, Debug, Clone, Default)]
pub struct AreaFactors {
    factors: BTreeMap<FactorTypeId, FactorInstance>,
}

impl AreaFactors {
    pub fn contains(&self, kind: FactorTypeId) -> bool {
        self.factors.contains_key(&kind)
    }

    /// Attach a fresh instance. No-op when the type is already present.
    pub fn attach(&mut self, instance: FactorInstance) -> bool {
        if self.factors.contains_key(&instance.kind) {
            return false;
        }
        self.factors.insert(instance.kind, instance);
        true
    }

    /// Detach (destroy) an instance. Detached instances never come back on
    /// their own; only a new spawn can reintroduce the type.
    pub fn detach(&mut self, kind: FactorTypeId) -> Option<FactorInstance> {
        self.factors.remove(&kind)
    }

    pub fn get(&self, kind: FactorTypeId) -> Option<&FactorInstance> {
        self.factors.get(&kind)
    }

    pub fn get_mut(&mut self, kind: FactorTypeId) -> Option<&mut FactorInstance> {
        self.factors.get_mut(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FactorInstance> {
        self.factors.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FactorInstance> {
        self.factors.values_mut()
    }
}
