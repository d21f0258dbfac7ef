//! Stress evaluation: how badly a position breaks the rules for one agent

use crate::core::config::SimulationParams;
use crate::core::types::{Agent, Position};

/// Rule violations seen from a candidate cell, before penalties are applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Violations {
    /// Other agents in the same cell
    pub crowding: u32,
    /// Same-value agents in the same row
    pub row: u32,
    /// Same-value agents in the same column
    pub col: u32,
    /// Same-value agents in the same 3x3 box
    pub boxed: u32,
}

impl Violations {
    pub fn is_clear(&self) -> bool {
        *self == Violations::default()
    }

    /// Weighted sum. Violations add up, nothing is capped.
    pub fn stress(&self, params: &SimulationParams) -> f32 {
        params.crowding_penalty * self.crowding as f32
            + params.row_penalty * self.row as f32
            + params.col_penalty * self.col as f32
            + params.box_penalty * self.boxed as f32
    }
}

/// Count violations for `agent` imagined at `candidate`, everyone else staying put
pub fn count_violations(agent: &Agent, candidate: Position, all_agents: &[Agent]) -> Violations {
    let candidate_box = candidate.box_index();
    let mut v = Violations::default();

    for other in all_agents.iter().filter(|o| o.id != agent.id) {
        if other.position == candidate {
            v.crowding += 1;
        }
        if other.value != agent.value {
            continue;
        }
        if other.position.row == candidate.row {
            v.row += 1;
        }
        if other.position.col == candidate.col {
            v.col += 1;
        }
        if other.position.box_index() == candidate_box {
            v.boxed += 1;
        }
    }

    v
}

/// Stress `agent` would feel at `candidate`
///
/// Works for the agent's own cell and for hypothetical moves alike.
pub fn evaluate_stress(
    agent: &Agent,
    candidate: Position,
    all_agents: &[Agent],
    params: &SimulationParams,
) -> f32 {
    count_violations(agent, candidate, all_agents).stress(params)
}
