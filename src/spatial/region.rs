//! Constraint modes and the regions they confine agents to

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::types::{Position, BOARD_SIZE};

/// Movement and initialization restriction for mobile agents
#[derive(
    Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintMode {
    /// Agents roam the whole board
    #[default]
    #[serde(rename = "none", alias = "free")]
    #[value(name = "none", alias = "free")]
    #[display(fmt = "none")]
    Free,
    #[display(fmt = "row")]
    Row,
    #[display(fmt = "col")]
    Col,
    #[display(fmt = "box")]
    Box,
}

impl ConstraintMode {
    /// Region kind this mode confines agents to, if any
    pub fn region_kind(&self) -> Option<RegionKind> {
        match self {
            ConstraintMode::Free => None,
            ConstraintMode::Row => Some(RegionKind::Row),
            ConstraintMode::Col => Some(RegionKind::Col),
            ConstraintMode::Box => Some(RegionKind::Box),
        }
    }

    /// Region containing `pos` under this mode (None in free mode)
    pub fn region_of(&self, pos: Position) -> Option<Region> {
        self.region_kind().map(|kind| Region::containing(kind, pos))
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    #[display(fmt = "row")]
    Row,
    #[display(fmt = "col")]
    Col,
    #[display(fmt = "box")]
    Box,
}

/// One row, column, or 3x3 box
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display(fmt = "{} {}", kind, index)]
pub struct Region {
    pub kind: RegionKind,
    pub index: u8,
}

impl Region {
    pub fn new(kind: RegionKind, index: u8) -> Self {
        Self { kind, index }
    }

    pub fn containing(kind: RegionKind, pos: Position) -> Self {
        let index = match kind {
            RegionKind::Row => pos.row,
            RegionKind::Col => pos.col,
            RegionKind::Box => pos.box_index(),
        };
        Self { kind, index }
    }

    /// All nine regions of a kind, in index order
    pub fn all(kind: RegionKind) -> impl Iterator<Item = Region> {
        (0..BOARD_SIZE).map(move |index| Region { kind, index })
    }

    pub fn contains(&self, pos: Position) -> bool {
        Region::containing(self.kind, pos) == *self
    }

    /// The region's nine cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(move |p| self.contains(*p))
    }
}
