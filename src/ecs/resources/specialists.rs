use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;

/// One field specialist. Hired specialists are stationed at an area; their
/// levels add to that region's survey power.
#[derive(Debug, Clone, PartialEq)]
pub struct Specialist {
    pub id: u64,
    pub name: String,
    pub level: u32,
    /// Area the specialist is stationed at. `None` while unhired.
    pub area: Option<Entity>,
}

impl Specialist {
    /// Hiring cost, scaling with level.
    pub fn cost(&self) -> i64 {
        self.level as i64 * 20
    }
}

/// Specialists currently on the payroll.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpecialistRoster {
    pub specialists: Vec<Specialist>,
}

/// Candidates currently offered for hire. Rebuilt by `refresh_hire_pool`.
#[derive(Resource, Debug, Clone, Default)]
pub struct HirePool {
    pub candidates: Vec<Specialist>,
}

impl HirePool {
    pub fn take(&mut self, id: u64) -> Option<Specialist> {
        let pos = self.candidates.iter().position(|s| s.id == id)?;
        Some(self.candidates.remove(pos))
    }
}
