//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, terminal rendering, preference storage).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - Rows above the board (negative y) are legal while a piece is spawning.
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity at level 0 |
//! | `DROP_STEP_MS` | 80 | Interval reduction per level |
//! | `DROP_FLOOR_MS` | 80 | Fastest gravity |
//! | `SOFT_DROP_DIVISOR` | 6 | Soft drop divides the interval |
//! | `SOFT_DROP_MIN_MS` | 30 | Fastest soft drop |
//! | `SOFT_DROP_GRACE_MS` | 150 | Soft drop hold timeout without release events |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, Theme, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//!
//! assert_eq!(Theme::from_str("crazy"), Some(Theme::Crazy));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Base gravity interval at level 0 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level.
pub const DROP_STEP_MS: u32 = 80;

/// Fastest gravity interval regardless of level.
pub const DROP_FLOOR_MS: u32 = 80;

/// Soft drop divides the current gravity interval by this.
pub const SOFT_DROP_DIVISOR: u32 = 6;

/// Fastest soft drop interval.
pub const SOFT_DROP_MIN_MS: u32 = 30;

/// Soft drop stays held this long after the last press when the terminal
/// does not report key releases.
pub const SOFT_DROP_GRACE_MS: u32 = 150;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Points per row descended by a hard drop.
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Cleared lines needed per level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Horizontal offsets tried, in order, after a rotation.
pub const KICK_OFFSETS: [i8; 5] = [0, 1, -1, 2, -2];

/// Number of upcoming pieces shown in the preview.
pub const NEXT_PREVIEW_LEN: usize = 5;

/// Pieces in one shuffled bag.
pub const BAG_SIZE: usize = 7;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and a per-theme color:
/// - **I**: 4x4 matrix, horizontal bar
/// - **O**: 2x2 square
/// - **T**, **S**, **Z**, **J**, **L**: 3x3 matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in bag order before shuffling.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Stable index into per-kind tables (palettes, board cell codes).
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Inverse of [`PieceKind::index`].
    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(PieceKind::I),
            1 => Some(PieceKind::O),
            2 => Some(PieceKind::T),
            3 => Some(PieceKind::S),
            4 => Some(PieceKind::Z),
            5 => Some(PieceKind::J),
            6 => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Cw,
    Ccw,
}

/// Game actions that can be applied to modify game state
///
/// Each action maps to a specific game mechanic. Movement, rotation, drops and
/// hold only take effect while the game is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Soft drop key pressed; gravity speeds up while held
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Swap with the hold slot (once per piece)
    Hold,
    /// Toggle pause state
    Pause,
    /// Start a new game (from any state)
    Restart,
}

impl GameAction {
    /// Convert to camelCase string (used in log output)
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Session lifecycle.
///
/// `Idle → Running ⇄ Paused`, `Running → GameOver`, and any state → `Running`
/// through a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl Phase {
    /// Whether movement, rotation, drops and hold are accepted.
    pub fn accepts_piece_input(&self) -> bool {
        matches!(self, Phase::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::GameOver => "game_over",
        }
    }
}

/// Color theme for the board and pieces.
///
/// `Crazy` picks a fresh random palette every time it is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Crazy,
}

impl Theme {
    /// Parse a stored theme name. Unknown names yield `None`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            "crazy" => Some(Theme::Crazy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Crazy => "crazy",
        }
    }

    /// The theme selected by the cycle key.
    pub fn next(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Crazy,
            Theme::Crazy => Theme::Dark,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Line clear scoring table (Classic scoring)
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(BASE_DROP_MS, 1000);
        assert_eq!(DROP_STEP_MS, 80);
        assert_eq!(DROP_FLOOR_MS, 80);
        assert_eq!(SOFT_DROP_DIVISOR, 6);
        assert_eq!(SOFT_DROP_MIN_MS, 30);
        assert_eq!(KICK_OFFSETS, [0, 1, -1, 2, -2]);
    }

    #[test]
    fn piece_kind_round_trips_through_str() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(PieceKind::from_str("x"), None);
    }

    #[test]
    fn theme_cycle_visits_every_theme() {
        let mut theme = Theme::Dark;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(theme);
            theme = theme.next();
        }
        assert_eq!(theme, Theme::Dark);
        assert_eq!(seen, vec![Theme::Dark, Theme::Light, Theme::Crazy]);
    }

    #[test]
    fn phase_accepts_input_only_while_running() {
        assert!(Phase::Running.accepts_piece_input());
        assert!(!Phase::Idle.accepts_piece_input());
        assert!(!Phase::Paused.accepts_piece_input());
        assert!(!Phase::GameOver.accepts_piece_input());
    }
}
