//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Side length of the board (rows and columns)
pub const BOARD_SIZE: u8 = 9;

/// Side length of a 3x3 box
pub const BOX_SIZE: u8 = 3;

/// Number of agents of each value on a complete board
pub const VALUES_PER_BOARD: usize = 9;

/// Simulation tick counter
pub type Tick = u64;

/// Unique identifier for agents
///
/// Only ever compared for identity, never ordered.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub Uuid);

impl AgentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

/// A cell on the 9x9 board
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display(fmt = "({}, {})", row, col)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// True when both coordinates are inside [0,8]
    #[inline]
    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Index of the 3x3 box containing this cell, row-major in [0,8]
    #[inline]
    pub fn box_index(&self) -> u8 {
        (self.row / BOX_SIZE) * BOX_SIZE + self.col / BOX_SIZE
    }

    /// Shift by a signed step. Returns None only when a coordinate would go
    /// negative; positions past the far edge are left for the movement
    /// validator to reject.
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Position> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(Position { row, col })
    }

    /// Chebyshev (king-move) distance
    #[inline]
    pub fn chebyshev_distance(&self, other: &Position) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// All 81 cells in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }
}

/// One placed number on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    /// Digit in [1,9], fixed for the agent's lifetime
    pub value: u8,
    pub position: Position,
    /// Accumulated discomfort, recomputed every tick
    pub stress: f32,
    /// Ticks spent above the stress threshold while breaking a rule
    pub consecutive_stress_ticks: u32,
    /// User-placed clue: occupies space, never moves
    pub is_fixed: bool,
}

impl Agent {
    /// A fresh mobile agent
    pub fn mobile(value: u8, position: Position) -> Self {
        Self {
            id: AgentId::new(),
            value,
            position,
            stress: 0.0,
            consecutive_stress_ticks: 0,
            is_fixed: false,
        }
    }

    /// A fresh fixed clue
    pub fn fixed(value: u8, position: Position) -> Self {
        Self {
            is_fixed: true,
            ..Self::mobile(value, position)
        }
    }
}

/// Sum of stress across a population
pub fn total_stress(agents: &[Agent]) -> f32 {
    agents.iter().map(|a| a.stress).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_id_uniqueness() {
        let a = AgentId::new();
        let b = AgentId::new();
        assert_ne!(a, b);
        assert_eq!(a, a);
    }

    #[test]
    fn test_box_index() {
        assert_eq!(Position::new(0, 0).box_index(), 0);
        assert_eq!(Position::new(2, 8).box_index(), 2);
        assert_eq!(Position::new(4, 4).box_index(), 4);
        assert_eq!(Position::new(8, 0).box_index(), 6);
        assert_eq!(Position::new(8, 8).box_index(), 8);
    }

    #[test]
    fn test_offset_stops_at_zero_edge() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(1, 0), Some(Position::new(1, 0)));

        // Far edge is not clipped here
        let far = Position::new(8, 8).offset(1, 0).unwrap();
        assert!(!far.in_bounds());
    }

    #[test]
    fn test_chebyshev_distance() {
        let p = Position::new(4, 4);
        assert_eq!(p.chebyshev_distance(&Position::new(5, 5)), 1);
        assert_eq!(p.chebyshev_distance(&Position::new(3, 4)), 1);
        assert_eq!(p.chebyshev_distance(&Position::new(6, 5)), 2);
        assert_eq!(p.chebyshev_distance(&p), 0);
    }

    #[test]
    fn test_all_positions_row_major() {
        let cells: Vec<Position> = Position::all().collect();
        assert_eq!(cells.len(), 81);
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[9], Position::new(1, 0));
        assert_eq!(cells[80], Position::new(8, 8));
    }

    #[test]
    fn test_fixed_agent_defaults() {
        let agent = Agent::fixed(7, Position::new(1, 2));
        assert!(agent.is_fixed);
        assert_eq!(agent.stress, 0.0);
        assert_eq!(agent.consecutive_stress_ticks, 0);
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 7).to_string(), "(3, 7)");
    }
}
