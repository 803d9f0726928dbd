mod adjacency;
mod structural;

pub use adjacency::{AreaAdjacency, AreaGrid, RegionIndex};
pub use structural::{InRegion, RegionMembers};
