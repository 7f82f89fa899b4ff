//! Pieces module - the tetromino catalog
//!
//! Spawn shapes sit in a 2-row box anchored at (0, 0). Cell index 1 is the
//! pivot for every piece except I, whose pivot is derived from cells 1 and 2.

use crate::geometry::{Point, Shape};
use crate::types::PieceKind;

const I_SPAWN: Shape = Shape::new([
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(1, 2),
    Point::new(1, 3),
]);

const J_SPAWN: Shape = Shape::new([
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(0, 0),
    Point::new(0, 2),
]);

const L_SPAWN: Shape = Shape::new([
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(1, 2),
    Point::new(0, 0),
]);

const O_SPAWN: Shape = Shape::new([
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 0),
    Point::new(0, 1),
]);

const S_SPAWN: Shape = Shape::new([
    Point::new(0, 0),
    Point::new(0, 1),
    Point::new(1, 1),
    Point::new(1, 2),
]);

const T_SPAWN: Shape = Shape::new([
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(1, 2),
    Point::new(0, 1),
]);

const Z_SPAWN: Shape = Shape::new([
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 1),
    Point::new(0, 2),
]);

/// Spawn-orientation shape for a piece kind, anchored at the origin.
pub fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SPAWN,
        PieceKind::J => J_SPAWN,
        PieceKind::L => L_SPAWN,
        PieceKind::O => O_SPAWN,
        PieceKind::S => S_SPAWN,
        PieceKind::T => T_SPAWN,
        PieceKind::Z => Z_SPAWN,
    }
}

/// How many left-edge columns a piece may spawn at (`0..n`).
///
/// Wider footprints get fewer choices so the piece always fits.
pub fn spawn_column_choices(kind: PieceKind) -> u32 {
    match kind {
        PieceKind::I => 7,
        PieceKind::O => 9,
        _ => 8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BOARD_WIDTH;

    #[test]
    fn every_spawn_shape_has_four_distinct_cells() {
        for kind in PieceKind::ALL {
            let shape = spawn_shape(kind);
            for (i, a) in shape.cells().iter().enumerate() {
                for b in &shape.cells()[i + 1..] {
                    assert_ne!(a, b, "{:?} repeats a cell", kind);
                }
            }
        }
    }

    #[test]
    fn spawn_shapes_fit_a_two_row_box_at_origin() {
        for kind in PieceKind::ALL {
            let shape = spawn_shape(kind);
            assert_eq!(shape.bottom_row(), 0);
            assert_eq!(shape.left_col(), 0);
            assert!(shape.height() <= 2, "{:?} too tall", kind);
        }
    }

    #[test]
    fn widest_spawn_column_keeps_piece_on_board() {
        for kind in PieceKind::ALL {
            let shape = spawn_shape(kind);
            let last = spawn_column_choices(kind) as u8 - 1;
            assert_eq!(last + shape.width(), BOARD_WIDTH, "{:?}", kind);
        }
    }

    #[test]
    fn t_pivot_is_the_center_of_the_bar() {
        let shape = spawn_shape(PieceKind::T);
        assert_eq!(shape.cells()[1], Point::new(1, 1));
    }
}
