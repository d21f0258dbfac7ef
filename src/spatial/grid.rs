//! Fixed 9x9 grid for per-cell board data

use crate::core::types::{Position, BOARD_SIZE};

const CELLS: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Dense 9x9 grid indexed by board position
#[derive(Debug, Clone, PartialEq)]
pub struct BoardGrid<T: Clone + Default> {
    data: Vec<T>,
}

impl<T: Clone + Default> Default for BoardGrid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Default> BoardGrid<T> {
    pub fn new() -> Self {
        Self {
            data: vec![T::default(); CELLS],
        }
    }

    #[inline]
    fn index(pos: Position) -> Option<usize> {
        if pos.in_bounds() {
            Some(pos.row as usize * BOARD_SIZE as usize + pos.col as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<&T> {
        Self::index(pos).map(|i| &self.data[i])
    }

    #[inline]
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        Self::index(pos).map(move |i| &mut self.data[i])
    }

    #[inline]
    pub fn set(&mut self, pos: Position, value: T) {
        if let Some(i) = Self::index(pos) {
            self.data[i] = value;
        }
    }

    /// Cells with their data, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        Position::all().zip(self.data.iter())
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}
