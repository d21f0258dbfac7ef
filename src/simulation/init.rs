//! Board initialization - seeds a run from the user's fixed clues
//!
//! Constrained modes fill each region with the values it is missing, so
//! every region holds one of each digit from the start. Free mode tops the
//! whole board up to nine of each digit.

use ahash::{AHashMap, AHashSet};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{Agent, Position, VALUES_PER_BOARD};
use crate::spatial::grid::BoardGrid;
use crate::spatial::region::{ConstraintMode, Region, RegionKind};

/// A value the initializer wanted to place but had no cell for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnplacedValue {
    /// Region the value belonged to (None in free mode)
    pub region: Option<Region>,
    pub value: u8,
    pub count: usize,
}

/// Starting agents for a run
#[derive(Debug, Clone)]
pub struct Initialization {
    /// Fixed clues followed by the newly spawned agents
    pub agents: Vec<Agent>,
    /// Values that did not fit. Empty for any consistent clue layout.
    pub unplaced: Vec<UnplacedValue>,
}

impl Initialization {
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}

/// Build the starting agent set for `mode`
///
/// Fixed agents are carried through unchanged. Spawned agents start calm and
/// mobile.
pub fn initialize_board<R: Rng + ?Sized>(
    fixed: &[Agent],
    mode: ConstraintMode,
    rng: &mut R,
) -> Initialization {
    let mut agents: Vec<Agent> = fixed.to_vec();

    let unplaced = match mode.region_kind() {
        Some(kind) => fill_regions(fixed, kind, &mut agents, rng),
        None => fill_free(fixed, &mut agents, rng),
    };

    Initialization { agents, unplaced }
}

/// One of each missing digit per region, shuffled over its empty cells
fn fill_regions<R: Rng + ?Sized>(
    fixed: &[Agent],
    kind: RegionKind,
    agents: &mut Vec<Agent>,
    rng: &mut R,
) -> Vec<UnplacedValue> {
    // First fixed clue in a cell wins
    let mut clues: BoardGrid<Option<u8>> = BoardGrid::new();
    for agent in fixed.iter().filter(|a| a.is_fixed) {
        if let Some(cell) = clues.get_mut(agent.position) {
            cell.get_or_insert(agent.value);
        }
    }

    let mut unplaced = Vec::new();

    for region in Region::all(kind) {
        let mut available: Vec<u8> = (1..=9).collect();
        let mut empty = Vec::new();

        for cell in region.cells() {
            match clues.get(cell).copied().flatten() {
                Some(value) => {
                    if let Some(idx) = available.iter().position(|&v| v == value) {
                        available.remove(idx);
                    }
                }
                None => empty.push(cell),
            }
        }

        available.shuffle(rng);

        for (i, &value) in available.iter().enumerate() {
            match empty.get(i) {
                Some(&cell) => agents.push(Agent::mobile(value, cell)),
                None => unplaced.push(UnplacedValue {
                    region: Some(region),
                    value,
                    count: 1,
                }),
            }
        }
    }

    unplaced
}

/// Nine of each digit across the board, on shuffled free cells
fn fill_free<R: Rng + ?Sized>(
    fixed: &[Agent],
    agents: &mut Vec<Agent>,
    rng: &mut R,
) -> Vec<UnplacedValue> {
    let mut counts: AHashMap<u8, usize> = AHashMap::new();
    let mut occupied: AHashSet<Position> = AHashSet::new();
    for agent in fixed.iter().filter(|a| a.is_fixed) {
        *counts.entry(agent.value).or_default() += 1;
        occupied.insert(agent.position);
    }

    let mut empty: Vec<Position> = Position::all().filter(|p| !occupied.contains(p)).collect();
    empty.shuffle(rng);
    let mut cells = empty.into_iter();

    let mut unplaced = Vec::new();

    for value in 1..=9u8 {
        let have = counts.get(&value).copied().unwrap_or(0);
        let needed = VALUES_PER_BOARD.saturating_sub(have);

        let mut missing = 0;
        for _ in 0..needed {
            match cells.next() {
                Some(cell) => agents.push(Agent::mobile(value, cell)),
                None => missing += 1,
            }
        }
        if missing > 0 {
            unplaced.push(UnplacedValue {
                region: None,
                value,
                count: missing,
            });
        }
    }

    unplaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn values_in(agents: &[Agent], region: Region) -> Vec<u8> {
        let mut values: Vec<u8> = agents
            .iter()
            .filter(|a| region.contains(a.position))
            .map(|a| a.value)
            .collect();
        values.sort_unstable();
        values
    }

    #[test]
    fn test_row_mode_fills_every_row() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let init = initialize_board(&[], ConstraintMode::Row, &mut rng);

        assert_eq!(init.agents.len(), 81);
        assert!(init.is_complete());
        for region in Region::all(RegionKind::Row) {
            assert_eq!(values_in(&init.agents, region), (1..=9).collect::<Vec<u8>>());
        }
    }

    #[test]
    fn test_col_mode_fills_every_column() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let init = initialize_board(&[], ConstraintMode::Col, &mut rng);
        for region in Region::all(RegionKind::Col) {
            assert_eq!(values_in(&init.agents, region), (1..=9).collect::<Vec<u8>>());
        }
    }

    #[test]
    fn test_clues_remove_values_from_region() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let clue = Agent::fixed(5, Position::new(0, 0));
        let init = initialize_board(&[clue.clone()], ConstraintMode::Box, &mut rng);

        assert_eq!(init.agents.len(), 81);
        assert_eq!(init.agents[0], clue);
        let box_zero = Region::new(RegionKind::Box, 0);
        assert_eq!(values_in(&init.agents, box_zero), (1..=9).collect::<Vec<u8>>());
        assert!(init
            .agents
            .iter()
            .filter(|a| !a.is_fixed)
            .all(|a| a.position != clue.position));
    }

    #[test]
    fn test_spawned_agents_start_calm() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let init = initialize_board(&[], ConstraintMode::Free, &mut rng);
        assert!(init
            .agents
            .iter()
            .all(|a| !a.is_fixed && a.stress == 0.0 && a.consecutive_stress_ticks == 0));
    }

    #[test]
    fn test_conflicting_clues_report_unplaced() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        // Two 1s in row 0: only one 1 leaves `available`, so the row has
        // 7 empty cells for 8 values
        let clues = vec![
            Agent::fixed(1, Position::new(0, 0)),
            Agent::fixed(1, Position::new(0, 1)),
        ];
        let init = initialize_board(&clues, ConstraintMode::Row, &mut rng);

        assert_eq!(init.unplaced.len(), 1);
        let lost = init.unplaced[0];
        assert_eq!(lost.region, Some(Region::new(RegionKind::Row, 0)));
        assert_eq!(lost.count, 1);
        assert_ne!(lost.value, 1);
        assert_eq!(init.agents.len(), 81);
    }

    #[test]
    fn test_free_mode_tops_up_to_nine() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let clues = vec![
            Agent::fixed(3, Position::new(0, 0)),
            Agent::fixed(3, Position::new(4, 4)),
        ];
        let init = initialize_board(&clues, ConstraintMode::Free, &mut rng);

        assert!(init.is_complete());
        assert_eq!(init.agents.len(), 81);
        for value in 1..=9u8 {
            assert_eq!(init.agents.iter().filter(|a| a.value == value).count(), 9);
        }
    }

    #[test]
    fn test_free_mode_over_supplied_value() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        // Ten 2s: value 2 needs none, the board runs one cell short for 9s
        let clues: Vec<Agent> = (0..9)
            .map(|col| Agent::fixed(2, Position::new(0, col)))
            .chain(std::iter::once(Agent::fixed(2, Position::new(1, 0))))
            .collect();
        let init = initialize_board(&clues, ConstraintMode::Free, &mut rng);

        assert_eq!(init.agents.iter().filter(|a| a.value == 2).count(), 10);
        assert_eq!(
            init.unplaced,
            vec![UnplacedValue {
                region: None,
                value: 9,
                count: 1
            }]
        );
    }

    #[test]
    fn test_seed_determines_layout() {
        let a = initialize_board(&[], ConstraintMode::Box, &mut ChaCha8Rng::seed_from_u64(11));
        let b = initialize_board(&[], ConstraintMode::Box, &mut ChaCha8Rng::seed_from_u64(11));
        let layout = |init: &Initialization| {
            init.agents
                .iter()
                .map(|a| (a.value, a.position))
                .collect::<Vec<_>>()
        };
        assert_eq!(layout(&a), layout(&b));
    }
}
