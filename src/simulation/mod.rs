//! The swarm engine and the controller that drives it

pub mod history;
pub mod init;
pub mod movement;
pub mod output;
pub mod runner;
pub mod stress;
pub mod tick;

pub use history::{HistoryPoint, ScoreRecord, Scoreboard, StressHistory};
pub use init::{initialize_board, Initialization, UnplacedValue};
pub use movement::{candidate_moves, is_legal_move};
pub use output::{render_board, RunOutput};
pub use runner::{RunOutcome, RunState, Simulation};
pub use stress::{evaluate_stress, Violations};
pub use tick::{effective_threshold, run_tick, run_tick_with_report, TickReport};
