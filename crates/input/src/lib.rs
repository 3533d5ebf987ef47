//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and provides a
//! held-key input handler suitable for terminal environments (including
//! terminals without key-release events).

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::{HorizontalDirection, InputHandler};
pub use map::{handle_key_event, should_cycle_theme, should_quit};
