pub mod grid;
pub mod region;

pub use grid::BoardGrid;
pub use region::{ConstraintMode, Region, RegionKind};
