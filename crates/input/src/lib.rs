//! Input module (engine-facing).
//!
//! Turns held keys into a stream of discrete [`crate::types::Intent`]s. The
//! DAS/ARR handler is driven purely by the elapsed time it is given, so it
//! runs the same under a real frame loop, a headless simulation or a test.
//! [`map`] holds the default `crossterm` key bindings.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, is_release, should_quit};
