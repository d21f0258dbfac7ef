//! Simulation parameters with documented defaults
//!
//! Every knob the engine reads lives here. Values are supplied by the caller
//! and never mutated by the engine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SwarmError};
use crate::spatial::region::ConstraintMode;

/// Parameters for a run
///
/// The defaults produce a swarm that usually settles a blank board in a few
/// hundred ticks under box mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    // === INFECTION ===
    /// Fraction of a stressed agent's stress pushed onto each 8-neighbour
    ///
    /// At 0.2 an agent at stress 20 adds 4 to every agent around it.
    pub infection_rate: f32,

    // === MOVEMENT TRIGGER ===
    /// Stress above which an agent considers moving and can infect others
    pub stress_threshold: f32,

    /// How much the movement threshold drops per consecutive stressed tick
    ///
    /// At 0.5 with threshold 5, an agent stuck for 10 ticks moves on any
    /// stress at all.
    pub threshold_decay: f32,

    /// Scale of the random noise subtracted from option scores while panicking
    ///
    /// Only applied after more than 5 consecutive stressed ticks.
    pub randomness_factor: f32,

    // === RULE PENALTIES ===
    /// Stress per other agent sharing the cell
    ///
    /// Kept low so agents can pass through each other on their way.
    pub crowding_penalty: f32,

    /// Stress per same-value agent in the row
    pub row_penalty: f32,

    /// Stress per same-value agent in the column
    pub col_penalty: f32,

    /// Stress per same-value agent in the 3x3 box
    pub box_penalty: f32,

    /// Passive creep added to carried-over stress when already stressed
    pub stress_accumulation: f32,

    // === RUN CONTROL ===
    /// Milliseconds between ticks when the run is driven in real time
    pub simulation_speed: u64,

    /// Region agents are seeded into and confined to
    pub constraint_mode: ConstraintMode,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            infection_rate: 0.2,
            stress_threshold: 5.0,
            threshold_decay: 0.5,
            randomness_factor: 2.0,
            crowding_penalty: 5.0,
            row_penalty: 20.0,
            col_penalty: 20.0,
            box_penalty: 20.0,
            stress_accumulation: 0.1,
            simulation_speed: 200,
            constraint_mode: ConstraintMode::Free,
        }
    }
}

impl SimulationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: ConstraintMode) -> Self {
        self.constraint_mode = mode;
        self
    }

    /// Reject parameters that make the stress math meaningless
    ///
    /// The tick engine itself never validates; call this where parameters
    /// enter the program.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.infection_rate) {
            return Err(SwarmError::InvalidParams(format!(
                "infection_rate ({}) must be within [0, 1]",
                self.infection_rate
            )));
        }

        let non_negative = [
            ("stress_threshold", self.stress_threshold),
            ("threshold_decay", self.threshold_decay),
            ("randomness_factor", self.randomness_factor),
            ("crowding_penalty", self.crowding_penalty),
            ("row_penalty", self.row_penalty),
            ("col_penalty", self.col_penalty),
            ("box_penalty", self.box_penalty),
            ("stress_accumulation", self.stress_accumulation),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(SwarmError::InvalidParams(format!(
                    "{} ({}) must be >= 0",
                    name, value
                )));
            }
        }

        if self.simulation_speed == 0 {
            return Err(SwarmError::InvalidParams(
                "simulation_speed must be at least 1ms".into(),
            ));
        }

        Ok(())
    }
}

/// Load and validate parameters from a TOML file
///
/// Missing keys fall back to the defaults.
pub fn load_params(path: &Path) -> Result<SimulationParams> {
    let content = fs::read_to_string(path)?;
    parse_params(&content)
}

/// Parse and validate parameters from TOML text
pub fn parse_params(content: &str) -> Result<SimulationParams> {
    let params: SimulationParams = toml::from_str(content)?;
    params.validate()?;
    Ok(params)
}
