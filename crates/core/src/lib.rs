//! Core rules engine - pure, deterministic, and testable
//!
//! Everything a falling-block game needs to decide what happens next:
//! shapes, the piece catalog, wall kicks, the board, scoring and the session
//! state machine. No I/O and no wall-clock reads; time and randomness are
//! supplied by the caller.
//!
//! # Module Structure
//!
//! - [`geometry`]: `Point`, `Shape` and quarter-turn rotation about a pivot
//! - [`pieces`]: spawn shapes and spawn column ranges for the 7 kinds
//! - [`kicks`]: three-tier wall kick tables and the first-fit rotation search
//! - [`rng`]: the injected `RandomSource`, a seeded LCG and the 7-bag
//! - [`board`]: 10x22 settled grid, collision and iterative row clearing
//! - [`scoring`]: lock and drop scores, corner-occupancy T-spin detection
//! - [`game_state`]: `GameSession`, the single owner of all game state
//! - [`snapshot`]: read-only per-frame export
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_core::types::{MoveDirection, RotationDirection};
//!
//! let mut game = GameSession::new(12345);
//!
//! game.move_piece(MoveDirection::Right);
//! game.rotate_piece(RotationDirection::Clockwise);
//! let rows = game.hard_drop();
//!
//! assert!(rows > 0);
//! assert!(game.score() >= 20); // hard drop bonus
//! assert_eq!(game.pieces_locked(), 1);
//! ```

pub mod board;
pub mod game_state;
pub mod geometry;
pub mod kicks;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{ActivePiece, GameSession, LockEvent, Phase};
pub use geometry::{PivotRule, Point, Shape};
pub use kicks::{kicks, try_rotate, Kick};
pub use pieces::{spawn_column_choices, spawn_shape};
pub use rng::{RandomSource, SevenBag, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_lock_score, is_t_spin, DropKind};
pub use snapshot::{ActiveSnapshot, GameSnapshot, Grid};
