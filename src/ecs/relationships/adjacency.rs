use std::collections::BTreeMap;

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;

use crate::model::{Axial, RegionId};

/// Area adjacency graph — bidirectional, sorted neighbor lists.
///
/// Built once by the world builder from explicit pairs; the core performs no
/// geometry. BTreeMap for deterministic iteration.
#[derive(Resource, Debug, Clone, Default)]
pub struct AreaAdjacency {
    adjacency: BTreeMap<Entity, Vec<Entity>>,
}

impl AreaAdjacency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bidirectional edge. Maintains sorted neighbor lists.
    pub fn add_edge(&mut self, a: Entity, b: Entity) {
        let a_neighbors = self.adjacency.entry(a).or_default();
        if let Err(pos) = a_neighbors.binary_search(&b) {
            a_neighbors.insert(pos, b);
        }

        let b_neighbors = self.adjacency.entry(b).or_default();
        if let Err(pos) = b_neighbors.binary_search(&a) {
            b_neighbors.insert(pos, a);
        }
    }

    /// Get sorted neighbors of an area.
    pub fn neighbors(&self, area: Entity) -> &[Entity] {
        self.adjacency.get(&area).map_or(&[], |v| v.as_slice())
    }

    /// Check if two areas are adjacent.
    pub fn are_adjacent(&self, a: Entity, b: Entity) -> bool {
        self.adjacency
            .get(&a)
            .is_some_and(|neighbors| neighbors.binary_search(&b).is_ok())
    }
}

/// Axial coordinate → area entity, for the survey spiral walk only.
#[derive(Resource, Debug, Clone, Default)]
pub struct AreaGrid {
    cells: BTreeMap<Axial, Entity>,
}

impl AreaGrid {
    pub fn insert(&mut self, coord: Axial, area: Entity) {
        self.cells.insert(coord, area);
    }

    pub fn get(&self, coord: Axial) -> Option<Entity> {
        self.cells.get(&coord).copied()
    }
}


/// Stable `RegionId` → region entity lookup.
#[derive(Resource, Debug, Clone, Default)]
pub struct RegionIndex {
    regions: BTreeMap<RegionId, Entity>,
}

impl RegionIndex {
    pub fn insert(&mut self, id: RegionId, region: Entity) {
        self.regions.insert(id, region);
    }

    pub fn get(&self, id: RegionId) -> Option<Entity> {
        self.regions.get(&id).copied()
    }

    /// Regions in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, Entity)> + '_ {
        self.regions.iter().map(|(&id, &e)| (id, e))
    }
}
