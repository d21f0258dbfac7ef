//! Movement legality under the active constraint mode

use crate::core::types::Position;
use crate::spatial::region::ConstraintMode;

/// Orthogonal steps in candidate order: up, down, left, right
pub const ORTHOGONAL_STEPS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Can an agent at `current` step onto `target` under `mode`?
pub fn is_legal_move(current: Position, target: Position, mode: ConstraintMode) -> bool {
    if !target.in_bounds() {
        return false;
    }

    match mode {
        ConstraintMode::Free => true,
        ConstraintMode::Row => current.row == target.row,
        ConstraintMode::Col => current.col == target.col,
        ConstraintMode::Box => current.box_index() == target.box_index(),
    }
}

/// Legal orthogonal neighbours of `current`, in candidate order
pub fn candidate_moves(current: Position, mode: ConstraintMode) -> Vec<Position> {
    ORTHOGONAL_STEPS
        .iter()
        .filter_map(|&(d_row, d_col)| current.offset(d_row, d_col))
        .filter(|&target| is_legal_move(current, target, mode))
        .collect()
}
