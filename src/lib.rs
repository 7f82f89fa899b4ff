//! Blockfall (workspace facade crate).
//!
//! Re-exports the rules engine crates under one roof:
//! `blockfall::{types, core, input, engine}`. The implementation lives in
//! dedicated crates under `crates/`.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_types as types;
