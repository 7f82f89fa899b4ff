//! Board module - the settled playfield
//!
//! 10 columns x 22 rows in a flat array. Row 0 is the bottom; rows 20 and 21
//! are the hidden spawn buffer. The board only ever holds settled blocks; the
//! falling piece lives in the session and is painted in for snapshots.

use crate::geometry::{Point, Shape};
use crate::types::{Block, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = WIDTH * HEIGHT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Row-major, bottom row first (`row * WIDTH + col`)
    cells: [Block; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Block::Empty; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if Self::in_bounds(row, col) {
            Some(row as usize * WIDTH + col as usize)
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn in_bounds(row: i8, col: i8) -> bool {
        (0..BOARD_HEIGHT as i8).contains(&row) && (0..BOARD_WIDTH as i8).contains(&col)
    }

    /// Cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: i8, col: i8) -> Option<Block> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Returns false if out of bounds.
    pub fn set(&mut self, row: i8, col: i8, block: Block) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = block;
                true
            }
            None => false,
        }
    }

    /// Out of bounds or holding a settled block.
    pub fn is_blocked(&self, point: Point) -> bool {
        !matches!(self.get(point.row, point.col), Some(Block::Empty))
    }

    /// True if any cell of `shape` is off the board or on a settled block.
    pub fn check_collision(&self, shape: &Shape) -> bool {
        shape.iter().any(|p| self.is_blocked(p))
    }

    /// Paint every in-bounds cell of `shape`.
    pub fn fill_shape(&mut self, shape: &Shape, block: Block) {
        for p in shape.iter() {
            self.set(p.row, p.col, block);
        }
    }

    pub fn row(&self, row: i8) -> Option<&[Block]> {
        if !(0..BOARD_HEIGHT as i8).contains(&row) {
            return None;
        }
        let start = row as usize * WIDTH;
        Some(&self.cells[start..start + WIDTH])
    }

    /// No empty cell in the row. Out-of-range rows are never full.
    pub fn is_row_full(&self, row: i8) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(|c| !c.is_empty()))
    }

    /// Remove `row`, shift everything above it down one, and clear the top row.
    pub fn delete_row(&mut self, row: i8) {
        if !(0..BOARD_HEIGHT as i8).contains(&row) {
            return;
        }
        let start = row as usize * WIDTH;
        self.cells.copy_within(start + WIDTH..BOARD_SIZE, start);
        for cell in &mut self.cells[BOARD_SIZE - WIDTH..] {
            *cell = Block::Empty;
        }
    }

    /// Clear full rows among `rows`, rescanning after every deletion until a
    /// full pass deletes nothing. Returns the number of rows removed.
    pub fn clear_completed_rows(&mut self, rows: &[i8]) -> u32 {
        let mut cleared = 0;
        loop {
            let mut deleted = false;
            for &row in rows {
                if self.is_row_full(row) {
                    self.delete_row(row);
                    cleared += 1;
                    deleted = true;
                }
            }
            if !deleted {
                return cleared;
            }
        }
    }

    /// Number of non-empty cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    pub fn clear(&mut self) {
        self.cells = [Block::Empty; BOARD_SIZE];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
