//! Read-only per-frame export for renderers and observers.

use crate::geometry::Point;
use crate::types::{Block, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Full playfield, bottom row first. Includes the hidden buffer rows.
pub type Grid = [[Block; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub cells: [Point; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Settled blocks with the active piece painted in.
    pub grid: Grid,
    pub active: Option<ActiveSnapshot>,
    /// Landing cells of the active piece (display only).
    pub ghost: Option<[Point; 4]>,
    pub hold: Option<PieceKind>,
    pub next: PieceKind,
    pub can_hold: bool,
    pub game_over: bool,
    pub score: u32,
    pub lines: u32,
    pub pieces_locked: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        !self.game_over && self.active.is_some()
    }

    /// Rows 0..20 only, for drawing the visible well.
    pub fn visible_rows(&self) -> &[[Block; BOARD_WIDTH as usize]] {
        &self.grid[..crate::types::VISIBLE_HEIGHT as usize]
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[Block::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost: None,
            hold: None,
            next: PieceKind::I,
            can_hold: true,
            game_over: false,
            score: 0,
            lines: 0,
            pieces_locked: 0,
        }
    }
}
