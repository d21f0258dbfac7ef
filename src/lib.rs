//! Sudoku Swarm - stress-driven agents that self-organize a Sudoku grid

pub mod clues;
pub mod core;
pub mod simulation;
pub mod spatial;
