use serde::{Deserialize, Serialize};

/// Environment classification of an area, fixed at world build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnvironmentType {
    Forest,
    Grassland,
    Wetland,
    Desert,
    Mountain,
    Tundra,
    Ocean,
}

/// Season derived from the calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// December through February are winter, then three months per season.
    /// Months wrap modulo twelve, so 13 reads as January.
    pub fn from_month(month: u32) -> Self {
        match month % 12 {
            0 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Autumn,
        }
    }
}
