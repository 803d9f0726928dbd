use std::ops::Deref;

use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;

// ---------------------------------------------------------------------------
// InRegion — area → region
// ---------------------------------------------------------------------------

/// An area's region. Set once at world build; never reassigned.
#[derive(Component, Clone, Debug)]
#[relationship(relationship_target = RegionMembers)]
pub struct InRegion(pub Entity);

/// The areas of a region, maintained by the `InRegion` relationship in
/// insertion order. The world builder inserts areas in ascending `AreaId`
/// order so iteration is deterministic.
#[derive(Component, Default, Debug)]
#[relationship_target(relationship = InRegion)]
pub struct RegionMembers(Vec<Entity>);

impl Deref for RegionMembers {
    type Target = [Entity];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
