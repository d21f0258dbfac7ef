//! Sudoku Swarm - headless run controller
//!
//! Loads a clue layout and parameters, runs the swarm until it converges or
//! hits the tick cap, and reports the result. Repeated runs on the same board
//! fill the scoreboard, fastest first.

use std::path::PathBuf;

use clap::Parser;
use sudoku_swarm::clues::{parse_clues, ClueLayout};
use sudoku_swarm::core::config::{load_params, SimulationParams};
use sudoku_swarm::core::error::Result;
use sudoku_swarm::simulation::output::{render_board, RunOutput};
use sudoku_swarm::simulation::Simulation;
use sudoku_swarm::spatial::ConstraintMode;

/// Stress-driven agent swarm that tries to settle a Sudoku grid
#[derive(Parser, Debug)]
#[command(name = "sudoku-swarm")]
#[command(about = "Run the Sudoku agent swarm headless and report convergence")]
struct Args {
    /// Puzzle file with fixed clues (81 cells, `.` or `0` for empty)
    #[arg(long)]
    puzzle: Option<PathBuf>,

    /// TOML file overriding simulation parameters
    #[arg(long)]
    params: Option<PathBuf>,

    /// Constraint mode (overrides the parameter file)
    #[arg(long, value_enum)]
    mode: Option<ConstraintMode>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum ticks per run before giving up
    #[arg(long, default_value_t = 5000)]
    max_ticks: u64,

    /// Number of runs on the same board
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// Pace ticks at `simulation_speed` milliseconds
    #[arg(long)]
    realtime: bool,

    /// Write the final run as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print the board before and after each run
    #[arg(long)]
    show_board: bool,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sudoku_swarm=info")),
        )
        .init();

    let args = Args::parse();

    let mut params = match &args.params {
        Some(path) => load_params(path)?,
        None => SimulationParams::default(),
    };
    if let Some(mode) = args.mode {
        params.constraint_mode = mode;
    }

    let clues = match &args.puzzle {
        Some(path) => parse_clues(&std::fs::read_to_string(path)?)?,
        None => ClueLayout::new(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, clues = clues.len(), mode = %params.constraint_mode, "Sudoku Swarm starting");

    let mut sim = Simulation::with_clues(clues, params, seed)?;

    for run in 1..=args.runs {
        sim.start()?;
        if args.show_board {
            println!("Run {} start:\n{}", run, render_board(sim.agents()));
        }

        let outcome = if args.realtime {
            sim.run_realtime(args.max_ticks)?
        } else {
            sim.run(args.max_ticks)?
        };

        if outcome.converged {
            println!("Run {}: converged in {} ticks", run, outcome.ticks);
        } else {
            println!(
                "Run {}: gave up after {} ticks, total stress {:.2}",
                run, outcome.ticks, outcome.total_stress
            );
        }
        if args.show_board {
            println!("{}", render_board(sim.agents()));
        }

        let output = RunOutput::from_simulation(&sim);
        if run == args.runs {
            println!("\n{}", output.summary());
            if let Some(path) = &args.json {
                std::fs::write(path, output.to_json())?;
                println!("Full output written to {}", path.display());
            }
        } else {
            sim.reset();
        }
    }

    if !sim.scoreboard().is_empty() {
        println!("\n--- Scoreboard ---");
        for (rank, record) in sim.scoreboard().records().iter().enumerate() {
            println!(
                "{:>2}. {:>6} ticks  (run {}, {})",
                rank + 1,
                record.ticks,
                record.run_id,
                record.timestamp.format("%H:%M:%S")
            );
        }
    }

    Ok(())
}
