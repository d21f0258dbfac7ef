use thiserror::Error;

use crate::core::types::Position;

#[derive(Error, Debug)]
pub enum SwarmError {
    #[error("Invalid clue value: {0} (expected 1-9)")]
    InvalidValue(u8),

    #[error("Position off the board: {0}")]
    OutOfBounds(Position),

    #[error("Operation '{operation}' not allowed while {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Puzzle parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SwarmError>;
