//! Kick module - wall kick tables and the rotation search
//!
//! Offsets are `(dx, dy)`: columns right, rows up. A rotation tries every
//! candidate in order and stops at the first one that fits:
//!
//! 1. the per-state table for the piece class (zero offset first),
//! 2. an extended ring of larger offsets,
//! 3. a last-resort set of far offsets.
//!
//! Earlier candidates always win ties.

use crate::geometry::{PivotRule, Shape};
use crate::types::{PieceKind, Rotation, RotationDirection};

/// One candidate translation `(dx, dy)`.
pub type Kick = (i8, i8);

/// Per-state kick lists for one direction, indexed by the pre-rotation state.
pub type KickTable = [[Kick; 11]; 4];

const O_KICKS: [Kick; 1] = [(0, 0)];

/// JLSTZ, clockwise (0->R, R->2, 2->L, L->0)
const JLSTZ_CW: KickTable = [
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2), (-2, 0), (-2, 1), (0, -3), (-1, -3), (-2, -2), (2, 0)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2), (2, 0), (2, -1), (0, 3), (1, 3), (2, 2), (-2, 0)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2), (2, 0), (2, 1), (0, -3), (1, -3), (2, -2), (-2, 0)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2), (-2, 0), (-2, -1), (0, 3), (-1, 3), (-2, 2), (2, 0)],
];

/// JLSTZ, counter-clockwise (0->L, R->0, 2->R, L->2)
const JLSTZ_CCW: KickTable = [
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2), (2, 0), (2, 1), (0, -3), (1, -3), (2, -2), (-2, 0)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2), (-2, 0), (-2, -1), (0, 3), (-1, 3), (-2, 2), (2, 0)],
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2), (-2, 0), (-2, 1), (0, -3), (-1, -3), (-2, -2), (2, 0)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2), (2, 0), (2, -1), (0, 3), (1, 3), (2, 2), (-2, 0)],
];

/// I, clockwise
const I_CW: KickTable = [
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2), (-2, 2), (1, -2), (3, 0), (-3, 0), (2, 3), (-2, -3)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1), (-2, -2), (3, 1), (3, -1), (-3, -1), (0, 3), (0, -3)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2), (2, -2), (-3, 0), (3, 2), (-1, -3), (4, 0), (-4, 0)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1), (2, 2), (-3, 1), (-3, -3), (3, -1), (0, 3), (0, -3)],
];

/// I, counter-clockwise
const I_CCW: KickTable = [
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1), (-2, 2), (3, 0), (1, -3), (-3, 1), (3, 3), (-3, -3)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2), (-2, -2), (3, 2), (-3, 0), (1, 3), (3, -3), (-3, 3)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1), (2, -2), (-3, -1), (3, 0), (-1, 3), (4, 0), (-4, 0)],
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2), (2, 2), (-3, 0), (3, -2), (-1, -3), (0, 3), (0, -3)],
];

/// Tried by every rotating piece once its own table is exhausted.
const EXTENDED_KICKS: [Kick; 12] = [
    (-3, 3), (3, 3), (3, -3), (-3, -3),
    (4, 2), (4, -2), (-4, 2), (-4, -2),
    (2, 4), (2, -4), (-2, 4), (-2, -4),
];

/// Far offsets, then corners, then very far offsets.
const LAST_RESORT_KICKS: [Kick; 12] = [
    (0, 4), (4, 0), (0, -4), (-4, 0),
    (3, 3), (-3, 3), (3, -3), (-3, -3),
    (5, 0), (0, 5), (-5, 0), (0, -5),
];

/// Primary kick list for a rotation from `from` in `direction`.
///
/// The first entry is always the zero offset. O gets only that entry.
pub fn kicks(kind: PieceKind, from: Rotation, direction: RotationDirection) -> &'static [Kick] {
    let state = from.index() as usize;
    let table = match (kind, direction) {
        (PieceKind::O, _) => return &O_KICKS,
        (PieceKind::I, RotationDirection::Clockwise) => &I_CW,
        (PieceKind::I, RotationDirection::CounterClockwise) => &I_CCW,
        (_, RotationDirection::Clockwise) => &JLSTZ_CW,
        (_, RotationDirection::CounterClockwise) => &JLSTZ_CCW,
    };
    &table[state]
}

/// Wider fallback tiers, tried in order after [`kicks`]. Empty for O.
pub fn fallback_kicks(kind: PieceKind) -> [&'static [Kick]; 2] {
    match kind {
        PieceKind::O => [&[], &[]],
        _ => [&EXTENDED_KICKS, &LAST_RESORT_KICKS],
    }
}

/// Every candidate offset across all tiers, in priority order.
pub fn kick_candidates(
    kind: PieceKind,
    from: Rotation,
    direction: RotationDirection,
) -> impl Iterator<Item = Kick> {
    let [extended, last_resort] = fallback_kicks(kind);
    kicks(kind, from, direction)
        .iter()
        .chain(extended)
        .chain(last_resort)
        .copied()
}

/// Try to rotate `shape` (currently in state `from`) with wall kicks.
///
/// `collides` reports whether a candidate placement is blocked.
/// Returns `Some((new_shape, new_rotation, kick))` for the first candidate
/// that fits, `None` if every candidate collides or the piece is O.
pub fn try_rotate(
    kind: PieceKind,
    from: Rotation,
    shape: &Shape,
    direction: RotationDirection,
    collides: impl Fn(&Shape) -> bool,
) -> Option<(Shape, Rotation, Kick)> {
    let rule = PivotRule::for_kind(kind);
    if rule == PivotRule::Fixed {
        return None;
    }

    let rotated = shape.rotated(rule, direction);
    kick_candidates(kind, from, direction).find_map(|(dx, dy)| {
        let kicked = rotated.translated(dy, dx);
        (!collides(&kicked)).then_some((kicked, from.turned(direction), (dx, dy)))
    })
}
