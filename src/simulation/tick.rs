//! Tick system - advances the whole swarm by one discrete step
//!
//! Each tick runs three phases, each finishing before the next starts:
//!
//! 1. **Rule stress** - every agent scores its own cell against the incoming
//!    snapshot and blends that with 10% of its carried-over stress.
//! 2. **Infection** - agents above the threshold push a share of their stress
//!    onto their 8-neighbourhood. Doses are summed first and applied at once,
//!    so stress caught this tick does not spread again until the next one.
//! 3. **Movement** - agents act one at a time in a freshly shuffled order,
//!    each seeing the moves already made by agents earlier in the order.
//!
//! All randomness comes from the caller's generator, so a seeded generator
//! reproduces a run exactly.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::SimulationParams;
use crate::core::types::{total_stress, Agent, Position};
use crate::simulation::movement::candidate_moves;
use crate::simulation::stress::evaluate_stress;

/// Share of last tick's stress carried into this one
pub const STRESS_CARRYOVER: f32 = 0.1;

/// Consecutive stressed ticks after which movement scores get noise
pub const PANIC_AFTER_TICKS: u32 = 5;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Agents that changed cell
    pub moves: usize,
    /// (source, target) infection contacts
    pub infections: usize,
    /// Sum of stress after the tick
    pub total_stress: f32,
}

/// Advance the swarm by one tick
pub fn run_tick<R: Rng + ?Sized>(
    agents: &[Agent],
    params: &SimulationParams,
    rng: &mut R,
) -> Vec<Agent> {
    run_tick_with_report(agents, params, rng).0
}

/// Advance the swarm by one tick and report what happened
pub fn run_tick_with_report<R: Rng + ?Sized>(
    agents: &[Agent],
    params: &SimulationParams,
    rng: &mut R,
) -> (Vec<Agent>, TickReport) {
    let mut next = update_rule_stress(agents, params);
    let infections = spread_infection(&mut next, params);
    let moves = move_agents(&mut next, params, rng);

    let report = TickReport {
        moves,
        infections,
        total_stress: total_stress(&next),
    };
    debug!(
        moves = report.moves,
        infections = report.infections,
        total_stress = report.total_stress,
        "tick complete"
    );

    (next, report)
}

/// Phase 1: score every agent in place against the pre-tick snapshot
pub fn update_rule_stress(snapshot: &[Agent], params: &SimulationParams) -> Vec<Agent> {
    snapshot
        .iter()
        .map(|agent| {
            let rule_stress = evaluate_stress(agent, agent.position, snapshot, params);

            let mut carried = agent.stress;
            if carried > 0.0 {
                carried += params.stress_accumulation;
            }

            let mut next = agent.clone();
            next.stress = rule_stress + STRESS_CARRYOVER * carried;

            // A rule-satisfied agent is never desperate, whatever it carries.
            // Fixed agents cannot act on desperation, so they never count it.
            next.consecutive_stress_ticks = if agent.is_fixed || rule_stress == 0.0 {
                0
            } else if next.stress > params.stress_threshold {
                agent.consecutive_stress_ticks.saturating_add(1)
            } else {
                0
            };

            next
        })
        .collect()
}

/// Phase 2: spread stress to 8-neighbours. Returns the number of contacts.
pub fn spread_infection(agents: &mut [Agent], params: &SimulationParams) -> usize {
    let mut pending = vec![0.0_f32; agents.len()];
    let mut contacts = 0;

    for source in agents.iter() {
        if source.stress <= params.stress_threshold {
            continue;
        }
        let dose = source.stress * params.infection_rate;

        for (target_idx, target) in agents.iter().enumerate() {
            if target.id == source.id {
                continue;
            }
            if source.position.chebyshev_distance(&target.position) <= 1 {
                pending[target_idx] += dose;
                contacts += 1;
            }
        }
    }

    for (agent, dose) in agents.iter_mut().zip(pending) {
        agent.stress += dose;
    }

    contacts
}

/// Movement threshold after desperation has worn it down (never below zero)
pub fn effective_threshold(params: &SimulationParams, consecutive_stress_ticks: u32) -> f32 {
    (params.stress_threshold - consecutive_stress_ticks as f32 * params.threshold_decay).max(0.0)
}

/// Phase 3: let stressed agents move, one at a time in random order.
/// Returns the number of agents that changed cell.
pub fn move_agents<R: Rng + ?Sized>(
    agents: &mut [Agent],
    params: &SimulationParams,
    rng: &mut R,
) -> usize {
    let mut order: Vec<usize> = (0..agents.len()).collect();
    order.shuffle(rng);

    let mut moved = 0;
    for idx in order {
        let agent = &agents[idx];
        if agent.is_fixed {
            continue;
        }
        if agent.stress <= effective_threshold(params, agent.consecutive_stress_ticks) {
            continue;
        }

        let destination = choose_destination(agent, agents, params, rng);
        if destination != agents[idx].position {
            agents[idx].position = destination;
            moved += 1;
        }
    }

    moved
}

/// Pick where a stressed agent goes: stay, a perfect neighbour, or the best
/// (possibly noisy) option.
///
/// Scores are taken against `agents` as they currently stand.
pub fn choose_destination<R: Rng + ?Sized>(
    agent: &Agent,
    agents: &[Agent],
    params: &SimulationParams,
    rng: &mut R,
) -> Position {
    let current = agent.position;
    let current_score = evaluate_stress(agent, current, agents, params);

    // Satisfied agents stay even if a neighbour would also be perfect
    if current_score == 0.0 {
        return current;
    }

    let scored: Vec<(Position, f32)> = candidate_moves(current, params.constraint_mode)
        .into_iter()
        .map(|pos| (pos, evaluate_stress(agent, pos, agents, params)))
        .collect();

    // No noise when a perfect spot exists
    let perfect: Vec<Position> = scored
        .iter()
        .filter(|(_, score)| *score == 0.0)
        .map(|(pos, _)| *pos)
        .collect();
    if let Some(&spot) = perfect.choose(rng) {
        return spot;
    }

    let panicking = agent.consecutive_stress_ticks > PANIC_AFTER_TICKS;
    let noise_scale = agent.consecutive_stress_ticks as f32 * params.randomness_factor;
    let mut noisy = |raw: f32| {
        if panicking {
            raw - rng.gen::<f32>() * noise_scale
        } else {
            raw
        }
    };

    let mut best = current;
    let mut best_score = noisy(current_score);
    for (pos, score) in scored {
        let score = noisy(score);
        if score < best_score {
            best = pos;
            best_score = score;
        }
    }

    best
}
