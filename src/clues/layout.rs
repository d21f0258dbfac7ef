//! The user's saved clue layout

use std::fmt;

use crate::core::error::{Result, SwarmError};
use crate::core::types::{Agent, Position, BOARD_SIZE};
use crate::spatial::grid::BoardGrid;

/// Fixed clues placed during setup, at most one per cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClueLayout {
    cells: BoardGrid<Option<u8>>,
}

impl ClueLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a clue, replacing whatever the cell held. Returns the old clue.
    pub fn place(&mut self, pos: Position, value: u8) -> Result<Option<u8>> {
        if !(1..=9).contains(&value) {
            return Err(SwarmError::InvalidValue(value));
        }
        let cell = self.cells.get_mut(pos).ok_or(SwarmError::OutOfBounds(pos))?;
        Ok(cell.replace(value))
    }

    /// Remove the clue at `pos`, if any
    pub fn remove(&mut self, pos: Position) -> Result<Option<u8>> {
        let cell = self.cells.get_mut(pos).ok_or(SwarmError::OutOfBounds(pos))?;
        Ok(cell.take())
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    pub fn get(&self, pos: Position) -> Option<u8> {
        self.cells.get(pos).copied().flatten()
    }

    /// Placed clues in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, u8)> + '_ {
        self.cells
            .iter()
            .filter_map(|(pos, value)| value.map(|v| (pos, v)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fresh fixed agents for a new run. Ids differ on every call.
    pub fn to_fixed_agents(&self) -> Vec<Agent> {
        self.iter()
            .map(|(pos, value)| Agent::fixed(value, pos))
            .collect()
    }
}

impl fmt::Display for ClueLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                match self.get(Position::new(row, col)) {
                    Some(value) => write!(f, "{}", value)?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_replaces_existing() {
        let mut layout = ClueLayout::new();
        assert_eq!(layout.place(Position::new(1, 1), 4).unwrap(), None);
        assert_eq!(layout.place(Position::new(1, 1), 6).unwrap(), Some(4));
        assert_eq!(layout.get(Position::new(1, 1)), Some(6));
        assert_eq!(layout.len(), 1);
    }

    #[test]
    fn test_invalid_value_rejected() {
        let mut layout = ClueLayout::new();
        assert!(matches!(
            layout.place(Position::new(0, 0), 0),
            Err(SwarmError::InvalidValue(0))
        ));
        assert!(matches!(
            layout.place(Position::new(0, 0), 10),
            Err(SwarmError::InvalidValue(10))
        ));
    }

    #[test]
    fn test_off_board_rejected() {
        let mut layout = ClueLayout::new();
        assert!(matches!(
            layout.place(Position::new(9, 0), 1),
            Err(SwarmError::OutOfBounds(_))
        ));
        assert!(layout.remove(Position::new(0, 9)).is_err());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut layout = ClueLayout::new();
        layout.place(Position::new(0, 0), 1).unwrap();
        layout.place(Position::new(8, 8), 9).unwrap();

        assert_eq!(layout.remove(Position::new(0, 0)).unwrap(), Some(1));
        assert_eq!(layout.remove(Position::new(0, 0)).unwrap(), None);
        assert_eq!(layout.len(), 1);

        layout.clear();
        assert!(layout.is_empty());
    }

    #[test]
    fn test_fixed_agents_are_fresh() {
        let mut layout = ClueLayout::new();
        layout.place(Position::new(2, 3), 7).unwrap();

        let first = layout.to_fixed_agents();
        let second = layout.to_fixed_agents();
        assert_eq!(first.len(), 1);
        assert!(first[0].is_fixed);
        assert_eq!(first[0].value, 7);
        assert_eq!(first[0].position, second[0].position);
        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn test_display() {
        let mut layout = ClueLayout::new();
        layout.place(Position::new(0, 0), 5).unwrap();
        let text = layout.to_string();
        let first_line = text.lines().next().unwrap();
        assert_eq!(first_line, "5........");
        assert_eq!(text.lines().count(), 9);
    }
}
