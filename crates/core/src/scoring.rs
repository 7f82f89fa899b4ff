//! Scoring module - lock scores, drop bonuses and T-spin detection
//!
//! Lock score for `n` cleared lines:
//! - base is `100 * n`, squared in `n` when more than one line clears
//! - a T-spin multiplies the base by `n + 1` and adds 400
//! - a T-spin with no lines is worth a flat 100
//!
//! Descents under gravity or soft drop earn 1 per row. A hard drop earns 20
//! plus 1 per row travelled.

use crate::board::Board;
use crate::geometry::{Point, Shape};
use crate::types::{
    PieceKind, GRAVITY_STEP_BONUS, HARD_DROP_BONUS, HARD_DROP_ROW_BONUS, LINE_CLEAR_BASE,
    TSPIN_CLEAR_BONUS, TSPIN_MINI_BONUS,
};

/// How a piece moved down, for drop scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropKind {
    /// Natural gravity or a soft-drop step
    Gravity,
    /// Hard drop straight to the floor
    Hard,
}

/// Score awarded when a piece locks.
pub fn calculate_lock_score(lines: u32, t_spin: bool) -> u32 {
    if lines == 0 {
        return if t_spin { TSPIN_MINI_BONUS } else { 0 };
    }

    let mut base = LINE_CLEAR_BASE * lines;
    if lines > 1 {
        base *= lines;
    }

    if t_spin {
        base * (lines + 1) + TSPIN_CLEAR_BONUS
    } else {
        base
    }
}

/// Score for `rows` of downward travel.
///
/// A hard drop always earns its flat bonus, even for zero rows.
pub fn calculate_drop_score(rows: u32, kind: DropKind) -> u32 {
    match kind {
        DropKind::Gravity => rows * GRAVITY_STEP_BONUS,
        DropKind::Hard => HARD_DROP_BONUS + rows * HARD_DROP_ROW_BONUS,
    }
}

/// Corner-occupancy T-spin check.
///
/// `board` is the settled grid before any rows clear; `shape` is where the
/// piece is locking. Only a T whose last successful action was a rotation
/// qualifies. Off-board diagonals count as blocked, as do cells of the piece
/// itself (a T's own cells are never diagonal to its pivot).
pub fn is_t_spin(
    board: &Board,
    kind: PieceKind,
    shape: &Shape,
    last_move_was_rotation: bool,
) -> bool {
    if kind != PieceKind::T || !last_move_was_rotation {
        return false;
    }

    let pivot = shape.cells()[1];
    let blocked = [(1, 1), (1, -1), (-1, 1), (-1, -1)]
        .iter()
        .filter(|&&(dr, dc)| {
            let corner = Point::new(pivot.row + dr, pivot.col + dc);
            shape.contains(corner) || board.is_blocked(corner)
        })
        .count();

    blocked >= 3
}
