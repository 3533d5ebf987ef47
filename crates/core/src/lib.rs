//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on terminal I/O or preference storage, making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, headless, benches)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 game board with collision detection and line clearing
//! - [`game_state`]: Complete session state including active piece, hold, scoring, timing
//! - [`pieces`]: Tetromino matrices, spawn placement and rotation with horizontal kicks
//! - [`rng`]: 7-bag random piece generation
//! - [`scoring`]: Classic line scores, hard drop points and speed progression
//! - [`snapshot`]: Read-only view consumed by renderers
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: Every block of 7 draws holds each piece type once
//! - **Matrix Rotation**: Turn the piece matrix by 90°, then try kicks `0, +1, -1, +2, -2`
//! - **Ghost Piece**: Shows where the current piece will land
//! - **Hold**: Store one piece for later use (once per piece)
//! - **Scoring**: `[0, 40, 100, 300, 1200] × (level + 1)`, 2 points per hard-dropped row
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! // Create and start a game
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! // Apply game actions
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Check game state
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! The loop calls [`GameState::tick`](game_state::GameState::tick) every frame
//! with the elapsed milliseconds. Gravity fires once the accumulated time
//! strictly exceeds the level interval (1000ms at level 0, 80ms minimum),
//! or a sixth of it while soft drop is held.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{CoreEvent, GameState};
pub use pieces::{try_rotate, Matrix, Tetromino};
pub use rng::PieceQueue;
pub use scoring::{
    calculate_drop_score, calculate_level, calculate_line_score, get_drop_interval_ms,
    get_soft_drop_interval_ms,
};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
