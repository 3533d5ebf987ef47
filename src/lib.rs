//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates as `blockfall::{core,input,prefs,term,types}`
//! while the implementation lives in dedicated crates under `crates/`.

pub mod app;
pub mod cli;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_prefs as prefs;
pub use blockfall_term as term;
pub use blockfall_types as types;
