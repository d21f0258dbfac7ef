pub mod config;
pub mod error;
pub mod types;

pub use config::{load_params, parse_params, SimulationParams};
pub use error::{Result, SwarmError};
pub use types::{Agent, AgentId, Position, Tick};
