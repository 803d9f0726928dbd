use bevy_ecs::component::Component;

/// Marker component for area entities (hex cells of the map).
#[derive(Component, Debug, Clone, Copy)]
pub struct Area;

/// Marker component for region entities (groups of areas).
#[derive(Component, Debug, Clone, Copy)]
pub struct Region;
