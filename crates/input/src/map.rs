//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(crate) fn is_left(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H')
    )
}

pub(crate) fn is_right(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L')
    )
}

pub(crate) fn is_down(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j' | 'J')
    )
}

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    if is_left(key.code) {
        return Some(GameAction::MoveLeft);
    }
    if is_right(key.code) {
        return Some(GameAction::MoveRight);
    }
    if is_down(key.code) {
        return Some(GameAction::SoftDrop);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k' | 'K') => Some(GameAction::HardDrop),

        // Rotation
        KeyCode::Char('x' | 'X') => Some(GameAction::RotateCw),
        KeyCode::Char('z' | 'Z') => Some(GameAction::RotateCcw),

        // Actions
        KeyCode::Char(' ' | 'c' | 'C') => Some(GameAction::Hold),
        KeyCode::Char('p' | 'P') => Some(GameAction::Pause),

        // New game
        KeyCode::Enter | KeyCode::Char('r' | 'R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key cycles the color theme.
pub fn should_cycle_theme(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('t') | KeyCode::Char('T'))
        && !key.modifiers.contains(KeyModifiers::CONTROL)
}
