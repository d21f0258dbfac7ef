//! Run controller - owns one board and drives it from setup to convergence

use std::thread;
use std::time::Duration;

use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::clues::ClueLayout;
use crate::core::config::SimulationParams;
use crate::core::error::{Result, SwarmError};
use crate::core::types::{total_stress, Agent, Position, Tick};
use crate::simulation::history::{HistoryPoint, ScoreRecord, Scoreboard, StressHistory};
use crate::simulation::init::{initialize_board, UnplacedValue};
use crate::simulation::tick::{run_tick_with_report, TickReport};
use crate::spatial::region::ConstraintMode;

/// Total stress at or below which a run counts as converged
pub const CONVERGENCE_STRESS: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Clues can be edited, no mobile agents exist
    Setup,
    Running,
    /// Stopped after total stress fell to the convergence level
    Converged,
}

impl RunState {
    pub fn label(&self) -> &'static str {
        match self {
            RunState::Setup => "in setup",
            RunState::Running => "running",
            RunState::Converged => "converged",
        }
    }
}

/// How a call to [`Simulation::run`] ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub ticks: Tick,
    pub converged: bool,
    pub total_stress: f32,
}

/// One board: clue layout, live agents, and the record of finished runs
pub struct Simulation {
    params: SimulationParams,
    /// Mode the current run was seeded with
    run_mode: ConstraintMode,
    clues: ClueLayout,
    agents: Vec<Agent>,
    state: RunState,
    tick_count: Tick,
    history: StressHistory,
    scoreboard: Scoreboard,
    unplaced: Vec<UnplacedValue>,
    last_report: Option<TickReport>,
    seed: u64,
    /// Random number generator (deterministic)
    rng: ChaCha8Rng,
    next_run_id: u64,
}

impl Simulation {
    pub fn new(params: SimulationParams, seed: u64) -> Result<Self> {
        Self::with_clues(ClueLayout::new(), params, seed)
    }

    pub fn with_clues(clues: ClueLayout, params: SimulationParams, seed: u64) -> Result<Self> {
        params.validate()?;
        let agents = clues.to_fixed_agents();
        Ok(Self {
            run_mode: params.constraint_mode,
            params,
            clues,
            agents,
            state: RunState::Setup,
            tick_count: 0,
            history: StressHistory::new(),
            scoreboard: Scoreboard::new(),
            unplaced: Vec::new(),
            last_report: None,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_run_id: 1,
        })
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Constraint mode in force for the current run. Matches
    /// `params().constraint_mode` until a new mode is set mid-run.
    pub fn run_mode(&self) -> ConstraintMode {
        self.run_mode
    }

    pub fn clues(&self) -> &ClueLayout {
        &self.clues
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn tick_count(&self) -> Tick {
        self.tick_count
    }

    pub fn history(&self) -> &StressHistory {
        &self.history
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Values the last start could not place
    pub fn unplaced(&self) -> &[UnplacedValue] {
        &self.unplaced
    }

    pub fn last_report(&self) -> Option<&TickReport> {
        self.last_report.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn total_stress(&self) -> f32 {
        total_stress(&self.agents)
    }

    fn require(&self, state: RunState, operation: &'static str) -> Result<()> {
        if self.state == state {
            Ok(())
        } else {
            Err(SwarmError::InvalidState {
                operation,
                state: self.state.label(),
            })
        }
    }

    // === SETUP ===

    /// Place a clue. Changing the board invalidates the scoreboard.
    pub fn place_clue(&mut self, pos: Position, value: u8) -> Result<()> {
        self.require(RunState::Setup, "place clue")?;
        self.clues.place(pos, value)?;
        self.clues_changed();
        Ok(())
    }

    pub fn remove_clue(&mut self, pos: Position) -> Result<()> {
        self.require(RunState::Setup, "remove clue")?;
        self.clues.remove(pos)?;
        self.clues_changed();
        Ok(())
    }

    pub fn clear_clues(&mut self) -> Result<()> {
        self.require(RunState::Setup, "clear clues")?;
        self.clues.clear();
        self.clues_changed();
        Ok(())
    }

    fn clues_changed(&mut self) {
        self.scoreboard.clear();
        self.agents = self.clues.to_fixed_agents();
    }

    /// Replace parameters. Takes effect on the next tick, except the
    /// constraint mode, which a run keeps from its start.
    pub fn set_params(&mut self, params: SimulationParams) -> Result<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    // === RUN ===

    /// Seed mobile agents around the clues and start ticking
    pub fn start(&mut self) -> Result<()> {
        self.require(RunState::Setup, "start")?;

        let fixed = self.clues.to_fixed_agents();
        self.run_mode = self.params.constraint_mode;
        let init = initialize_board(&fixed, self.run_mode, &mut self.rng);
        if !init.is_complete() {
            warn!(
                unplaced = init.unplaced.len(),
                "clue layout left values without a cell"
            );
        }

        self.agents = init.agents;
        self.unplaced = init.unplaced;
        self.tick_count = 0;
        self.history.clear();
        self.last_report = None;
        self.state = RunState::Running;
        self.sample_history();

        info!(
            agents = self.agents.len(),
            clues = fixed.len(),
            mode = %self.run_mode,
            "run started"
        );
        Ok(())
    }

    /// Advance one tick and check for convergence
    pub fn tick(&mut self) -> Result<TickReport> {
        self.require(RunState::Running, "tick")?;

        let params = self.run_params();
        let (agents, report) = run_tick_with_report(&self.agents, &params, &mut self.rng);
        self.agents = agents;
        self.tick_count += 1;
        self.last_report = Some(report);
        self.sample_history();

        // Only checked after a tick, so a calm starting board never counts
        if report.total_stress <= CONVERGENCE_STRESS {
            self.converge();
        }

        Ok(report)
    }

    /// Current parameters with the mode pinned to the one the run started in
    fn run_params(&self) -> SimulationParams {
        SimulationParams {
            constraint_mode: self.run_mode,
            ..self.params.clone()
        }
    }

    fn sample_history(&mut self) {
        let point = HistoryPoint {
            tick: self.tick_count,
            total_stress: self.total_stress(),
            settled_count: self.agents.iter().filter(|a| a.stress == 0.0).count(),
        };
        if self.history.record(point) {
            debug!(tick = point.tick, total_stress = point.total_stress, "history sample");
        }
    }

    fn converge(&mut self) {
        self.state = RunState::Converged;
        let record = ScoreRecord {
            run_id: self.next_run_id,
            ticks: self.tick_count,
            params: self.run_params(),
            timestamp: Utc::now(),
        };
        self.next_run_id += 1;
        info!(
            run_id = record.run_id,
            ticks = record.ticks,
            "run converged"
        );
        self.scoreboard.record(record);
    }

    /// Drop the mobile agents and return to setup. Clues and the scoreboard
    /// are kept so runs can be compared.
    pub fn reset(&mut self) {
        self.agents = self.clues.to_fixed_agents();
        self.state = RunState::Setup;
        self.tick_count = 0;
        self.history.clear();
        self.unplaced.clear();
        self.last_report = None;
        info!("run reset");
    }

    /// Tick until converged or `max_ticks` have run in this call
    pub fn run(&mut self, max_ticks: Tick) -> Result<RunOutcome> {
        self.run_paced(max_ticks, None)
    }

    /// Like [`Simulation::run`], waiting `simulation_speed` ms before each tick
    pub fn run_realtime(&mut self, max_ticks: Tick) -> Result<RunOutcome> {
        let pause = Duration::from_millis(self.params.simulation_speed);
        self.run_paced(max_ticks, Some(pause))
    }

    fn run_paced(&mut self, max_ticks: Tick, pause: Option<Duration>) -> Result<RunOutcome> {
        self.require(RunState::Running, "run")?;

        for _ in 0..max_ticks {
            if let Some(pause) = pause {
                thread::sleep(pause);
            }
            self.tick()?;
            if self.state == RunState::Converged {
                break;
            }
        }

        Ok(RunOutcome {
            ticks: self.tick_count,
            converged: self.state == RunState::Converged,
            total_stress: self.total_stress(),
        })
    }
}
