//! Geometry module - pure functions on 4-cell shapes
//!
//! Coordinates are `(row, col)` with row 0 at the bottom of the board and
//! column 0 on the left. Every function here is total and side-effect free;
//! collision and bounds are the board's business.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, RotationDirection};

/// A single cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub row: i8,
    pub col: i8,
}

impl Point {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }
}

/// How a piece kind turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotRule {
    /// Never rotates (the O piece).
    Fixed,
    /// Rotates about the cell at this index.
    Cell(usize),
    /// Rotates about the lattice corner beside the midpoint of cells 1 and 2
    /// (the I piece). The half-cell offset matches SRS column placement and
    /// keeps four quarter turns an exact round trip.
    Midpoint,
}

impl PivotRule {
    pub fn for_kind(kind: PieceKind) -> Self {
        match kind {
            PieceKind::O => PivotRule::Fixed,
            PieceKind::I => PivotRule::Midpoint,
            _ => PivotRule::Cell(1),
        }
    }
}

/// Exactly four cells. Index order is significant: it selects the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape([Point; 4]);

/// Quarter turn of an offset. Clockwise with row pointing up.
#[inline(always)]
fn turn(d_row: i8, d_col: i8, direction: RotationDirection) -> (i8, i8) {
    match direction {
        RotationDirection::Clockwise => (-d_col, d_row),
        RotationDirection::CounterClockwise => (d_col, -d_row),
    }
}

impl Shape {
    pub const fn new(cells: [Point; 4]) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[Point; 4] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.0.contains(&point)
    }

    /// Shift every cell by the given row/column delta.
    pub fn translated(&self, d_row: i8, d_col: i8) -> Shape {
        let mut out = self.0;
        for p in &mut out {
            p.row += d_row;
            p.col += d_col;
        }
        Shape(out)
    }

    pub fn rotated_cw(&self, rule: PivotRule) -> Shape {
        self.rotated(rule, RotationDirection::Clockwise)
    }

    pub fn rotated_ccw(&self, rule: PivotRule) -> Shape {
        self.rotated(rule, RotationDirection::CounterClockwise)
    }

    /// Rotate a quarter turn about the pivot selected by `rule`.
    ///
    /// The midpoint pivot is worked out in doubled coordinates: twice the
    /// center is `s1 + s2 + cw(s2 - s1)`, which always lands every rotated
    /// cell back on an integer position.
    pub fn rotated(&self, rule: PivotRule, direction: RotationDirection) -> Shape {
        match rule {
            PivotRule::Fixed => *self,
            PivotRule::Cell(index) => {
                let pivot = self.0[index];
                let mut out = self.0;
                for p in &mut out {
                    let (r, c) = turn(p.row - pivot.row, p.col - pivot.col, direction);
                    *p = Point::new(pivot.row + r, pivot.col + c);
                }
                Shape(out)
            }
            PivotRule::Midpoint => {
                let a = self.0[1];
                let b = self.0[2];
                let (side_r, side_c) = turn(
                    b.row - a.row,
                    b.col - a.col,
                    RotationDirection::Clockwise,
                );
                let center_r = a.row + b.row + side_r;
                let center_c = a.col + b.col + side_c;

                let mut out = self.0;
                for p in &mut out {
                    let (r, c) = turn(2 * p.row - center_r, 2 * p.col - center_c, direction);
                    debug_assert!((center_r + r) % 2 == 0 && (center_c + c) % 2 == 0);
                    *p = Point::new((center_r + r) / 2, (center_c + c) / 2);
                }
                Shape(out)
            }
        }
    }

    /// Number of columns spanned.
    pub fn width(&self) -> u8 {
        let min = self.0.iter().map(|p| p.col).min().unwrap_or(0);
        let max = self.0.iter().map(|p| p.col).max().unwrap_or(0);
        (max - min + 1) as u8
    }

    /// Number of rows spanned.
    pub fn height(&self) -> u8 {
        (self.top_row() - self.bottom_row() + 1) as u8
    }

    pub fn bottom_row(&self) -> i8 {
        self.0.iter().map(|p| p.row).min().unwrap_or(0)
    }

    pub fn top_row(&self) -> i8 {
        self.0.iter().map(|p| p.row).max().unwrap_or(0)
    }

    pub fn left_col(&self) -> i8 {
        self.0.iter().map(|p| p.col).min().unwrap_or(0)
    }

    /// Distinct rows touched, in cell order.
    pub fn rows(&self) -> ArrayVec<i8, 4> {
        let mut rows = ArrayVec::new();
        for p in &self.0 {
            if !rows.contains(&p.row) {
                rows.push(p.row);
            }
        }
        rows
    }
}
