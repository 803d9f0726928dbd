mod area;
mod common;
mod region;

pub use area::*;
pub use common::*;
pub use region::*;
