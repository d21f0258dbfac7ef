//! Run output and text rendering

use serde::{Deserialize, Serialize};

use crate::core::types::{Agent, Position, Tick, BOARD_SIZE, BOX_SIZE};
use crate::simulation::history::{HistoryPoint, ScoreRecord};
use crate::simulation::init::UnplacedValue;
use crate::simulation::runner::{RunState, Simulation};
use crate::spatial::grid::BoardGrid;

/// Serializable snapshot of a board and its run record
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunOutput {
    pub seed: u64,
    pub state: RunState,
    pub tick_count: Tick,
    pub total_stress: f32,
    pub agents: Vec<Agent>,
    pub history: Vec<HistoryPoint>,
    pub scoreboard: Vec<ScoreRecord>,
    pub unplaced: Vec<UnplacedValue>,
}

impl RunOutput {
    pub fn from_simulation(sim: &Simulation) -> Self {
        Self {
            seed: sim.seed(),
            state: sim.state(),
            tick_count: sim.tick_count(),
            total_stress: sim.total_stress(),
            agents: sim.agents().to_vec(),
            history: sim.history().iter().copied().collect(),
            scoreboard: sim.scoreboard().records().to_vec(),
            unplaced: sim.unplaced().to_vec(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        let crowded = count_crowded_cells(&self.agents);
        let outcome = match self.state {
            RunState::Converged => "converged",
            RunState::Running => "still stressed",
            RunState::Setup => "not started",
        };
        format!(
            "{} after {} ticks (seed {})\n{} agents, total stress {:.2}, {} crowded cells, {} converged runs",
            outcome,
            self.tick_count,
            self.seed,
            self.agents.len(),
            self.total_stress,
            crowded,
            self.scoreboard.len(),
        )
    }
}

fn occupancy(agents: &[Agent]) -> BoardGrid<Vec<u8>> {
    let mut cells: BoardGrid<Vec<u8>> = BoardGrid::new();
    for agent in agents {
        if let Some(cell) = cells.get_mut(agent.position) {
            cell.push(agent.value);
        }
    }
    cells
}

/// Cells holding more than one agent
pub fn count_crowded_cells(agents: &[Agent]) -> usize {
    occupancy(agents).iter().filter(|(_, v)| v.len() > 1).count()
}

/// Draw the board: digits for single agents, `.` for empty, `*` for crowded.
/// A value outside 0-9 shows as `?`.
pub fn render_board(agents: &[Agent]) -> String {
    let cells = occupancy(agents);
    let mut out = String::new();

    for row in 0..BOARD_SIZE {
        if row > 0 && row % BOX_SIZE == 0 {
            out.push_str("------+-------+------\n");
        }
        for col in 0..BOARD_SIZE {
            if col > 0 && col % BOX_SIZE == 0 {
                out.push_str("| ");
            }
            let symbol = match cells.get(Position::new(row, col)).map(|v| v.as_slice()) {
                Some([value]) => char::from_digit(u32::from(*value), 10).unwrap_or('?'),
                Some([]) | None => '.',
                Some(_) => '*',
            };
            out.push(symbol);
            out.push(if col + 1 < BOARD_SIZE { ' ' } else { '\n' });
        }
    }

    out
}
