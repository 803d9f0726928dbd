pub mod environment;
pub mod event;
pub mod factor;
pub mod grid;
pub mod species;

use serde::{Deserialize, Serialize};

pub use environment::{EnvironmentType, Season};
pub use event::{AreaRequirement, EventSpec, EventSpecId, StageCondition, StageSpec};
pub use factor::{FactorType, FactorTypeId};
pub use grid::{Axial, HexSpiral};
pub use species::{DangerLevel, EnvironmentPreference, Species, SpeciesId};

/// Stable identity of a single area, assigned by the world builder.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct AreaId(pub u32);

/// Stable identity of a region. `-1` is reserved for the ocean region,
/// which never runs daily population or event logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionId(pub i32);

impl RegionId {
    pub const OCEAN: RegionId = RegionId(-1);

    pub fn is_ocean(self) -> bool {
        self.0 == -1
    }
}
