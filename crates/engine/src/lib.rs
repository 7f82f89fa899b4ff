//! Frame controller - the per-tick driver around a `GameSession`.
//!
//! The session decides what a move or a lock does; this crate decides when
//! they happen. Each tick applies queued and auto-repeated intents first,
//! then runs lock delay and gravity against the supplied elapsed time.
//! Nothing here reads a clock.

pub mod config;
pub mod frame;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_types as types;

pub use config::FrameConfig;
pub use frame::{FrameController, TickReport};
