//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by every other crate in the
//! workspace. They are plain data with no I/O, so the rules engine, the input
//! translator and any renderer can all agree on them.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 22 rows (indexed 0-21, bottom to top)
//! - **Visible rows**: 0-19; rows 20 and 21 are the spawn buffer
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds and are tunable balance parameters:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BASE_GRAVITY_MS` | 800 | Gravity interval at the start of a game |
//! | `GRAVITY_FLOOR_MS` | 100 | Fastest gravity interval |
//! | `SPEED_UP_INTERVAL_MS` | 60000 | Play time between speed-ups |
//! | `SPEED_UP_STEP_MS` | 100 | Gravity reduction per speed-up |
//! | `LOCK_DELAY_MS` | 250 | Time a resting piece waits before it locks |
//! | `LOCK_RESET_LIMIT` | 30 | Max lock-delay resets per piece |
//! | `DEFAULT_DAS_MS` | 150 | Delay before horizontal auto-repeat starts |
//! | `DEFAULT_ARR_MS` | 50 | Interval between horizontal auto-repeats |
//! | `SOFT_DROP_ARR_MS` | 50 | Interval between soft-drop repeats |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, Rotation, Intent, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece: PieceKind = "t".parse().unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Intent::from_str("hardDrop"), Some(Intent::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

use std::str::FromStr;

use thiserror::Error;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells, including the 2-row spawn buffer (22 rows)
pub const BOARD_HEIGHT: u8 = 22;

/// Number of rows shown to the player (rows 0-19)
pub const VISIBLE_HEIGHT: u8 = 20;

/// Row offset applied to catalog shapes when a piece spawns.
///
/// Spawn shapes span rows 0-1, so a fresh piece occupies rows 20-21.
pub const SPAWN_ROW: i8 = 20;

/// Any locked cell at or above this row ends the game.
pub const GAME_OVER_ROW: i8 = 20;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval when a game starts
pub const BASE_GRAVITY_MS: u32 = 800;

/// Gravity never gets faster than this
pub const GRAVITY_FLOOR_MS: u32 = 100;

/// Play time between gravity speed-ups
pub const SPEED_UP_INTERVAL_MS: u32 = 60_000;

/// Gravity reduction applied at each speed-up
pub const SPEED_UP_STEP_MS: u32 = 100;

/// Lock delay once a piece rests on something
pub const LOCK_DELAY_MS: u32 = 250;

/// Maximum number of lock-delay resets per piece
pub const LOCK_RESET_LIMIT: u8 = 30;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Soft drop repeats start immediately.
pub const SOFT_DROP_DAS_MS: u32 = 0;

/// Soft drop repeat interval in milliseconds.
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// Held keys auto-release after this long without a press event.
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Base points for a line clear (multiplied per line count)
pub const LINE_CLEAR_BASE: u32 = 100;

/// Flat bonus added to any T-spin that clears lines
pub const TSPIN_CLEAR_BONUS: u32 = 400;

/// Points for a T-spin that clears nothing
pub const TSPIN_MINI_BONUS: u32 = 100;

/// Points for each row a piece descends by gravity or soft drop
pub const GRAVITY_STEP_BONUS: u32 = 1;

/// Flat points for any hard drop
pub const HARD_DROP_BONUS: u32 = 20;

/// Extra hard drop points per row travelled
pub const HARD_DROP_ROW_BONUS: u32 = 1;

/// Errors for values that fall outside the closed sets below.
///
/// None of these are reachable through normal play; they guard conversions
/// from raw indices and names.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid piece kind index {0} (expected 0..7)")]
    InvalidPieceKind(u8),
    #[error("unknown piece name {0:?}")]
    UnknownPieceName(String),
    #[error("invalid rotation index {0} (expected 0..4)")]
    InvalidRotationIndex(u8),
}

/// The seven tetromino piece kinds
///
/// Each kind maps 1:1 to a display color:
/// - **I**: Blue
/// - **J**: Green
/// - **L**: Light blue
/// - **O**: Pink
/// - **S**: Red
/// - **T**: Purple
/// - **Z**: Yellow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Catalog index (0..7).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Display color for this kind.
    pub fn color(self) -> Color {
        match self {
            PieceKind::I => Color::Blue,
            PieceKind::J => Color::Green,
            PieceKind::L => Color::LightBlue,
            PieceKind::O => Color::Pink,
            PieceKind::S => Color::Red,
            PieceKind::T => Color::Purple,
            PieceKind::Z => Color::Yellow,
        }
    }

    /// Settled-cell value for this kind.
    pub fn block(self) -> Block {
        Block::Solid(self.color())
    }

    /// Convert to lowercase string representation
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_str(), "i");
    /// assert_eq!(PieceKind::O.as_str(), "o");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

impl TryFrom<u8> for PieceKind {
    type Error = TypesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PieceKind::ALL
            .get(value as usize)
            .copied()
            .ok_or(TypesError::InvalidPieceKind(value))
    }
}

impl FromStr for PieceKind {
    type Err = TypesError;

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!("i".parse::<PieceKind>(), Ok(PieceKind::I));
    /// assert_eq!("O".parse::<PieceKind>(), Ok(PieceKind::O));
    /// assert!("unknown".parse::<PieceKind>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "i" => Ok(PieceKind::I),
            "j" => Ok(PieceKind::J),
            "l" => Ok(PieceKind::L),
            "o" => Ok(PieceKind::O),
            "s" => Ok(PieceKind::S),
            "t" => Ok(PieceKind::T),
            "z" => Ok(PieceKind::Z),
            _ => Err(TypesError::UnknownPieceName(s.to_string())),
        }
    }
}

/// Display colors available to cells.
///
/// `Gray` never comes out of a piece; renderers use it for markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    LightBlue,
    Blue,
    Pink,
    Purple,
    Red,
    Yellow,
    Green,
    Gray,
}

/// A cell value on the grid.
///
/// `Special` variants exist for renderers (highlight / ghost styling). The
/// rules engine only ever writes `Empty` and `Solid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Block {
    #[default]
    Empty,
    Solid(Color),
    Special(Color),
}

impl Block {
    pub fn is_empty(&self) -> bool {
        matches!(self, Block::Empty)
    }

    /// Index into a 2x8 sprite sheet (solid row first), `None` for empty.
    pub fn sprite_index(&self) -> Option<u8> {
        match self {
            Block::Empty => None,
            Block::Solid(c) => Some(*c as u8),
            Block::Special(c) => Some(8 + *c as u8),
        }
    }
}

/// Rotation states (North = spawn orientation)
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation index in 0..4 (0 = spawn)
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// `(state + direction) mod 4`, normalized to 0..4.
    pub fn turned(&self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.rotate_cw(),
            RotationDirection::CounterClockwise => self.rotate_ccw(),
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

impl TryFrom<u8> for Rotation {
    type Error = TypesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Rotation::North),
            1 => Ok(Rotation::East),
            2 => Ok(Rotation::South),
            3 => Ok(Rotation::West),
            _ => Err(TypesError::InvalidRotationIndex(value)),
        }
    }
}

/// Direction of a rotation attempt (+1 clockwise, -1 counter-clockwise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    pub fn sign(self) -> i8 {
        match self {
            RotationDirection::Clockwise => 1,
            RotationDirection::CounterClockwise => -1,
        }
    }
}

/// Direction of a horizontal move (-1 left, +1 right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Left,
    Right,
}

impl MoveDirection {
    pub fn delta(self) -> i8 {
        match self {
            MoveDirection::Left => -1,
            MoveDirection::Right => 1,
        }
    }
}

/// Discrete player intents fed to the engine once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (with per-step scoring)
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (if available)
    Hold,
}

impl Intent {
    /// Parse intent from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("rotateccw"), Some(Intent::RotateCcw));
    /// assert_eq!(Intent::from_str("pause"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdrop" => Some(Intent::SoftDrop),
            "harddrop" => Some(Intent::HardDrop),
            "rotatecw" => Some(Intent::RotateCw),
            "rotateccw" => Some(Intent::RotateCcw),
            "hold" => Some(Intent::Hold),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::HardDrop => "hardDrop",
            Intent::RotateCw => "rotateCw",
            Intent::RotateCcw => "rotateCcw",
            Intent::Hold => "hold",
        }
    }
}
