//! Held-key input handler for terminal environments.
//!
//! Horizontal moves repeat with DAS/ARR; soft drop is tracked as a held flag
//! that shortens the gravity interval. Terminals that never emit key release
//! events are handled with a release timeout.

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use arrayvec::ArrayVec;

use crate::map::{is_down, is_left, is_right};
use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_GRACE_MS};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    last_horizontal_key: Instant,
    last_down_key: Instant,
    das_timer: u32,
    arr_accumulator: u32,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        let now = Instant::now();
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            last_horizontal_key: now,
            last_down_key: now,
            das_timer: 0,
            arr_accumulator: 0,
            das_delay,
            arr_rate: arr_rate.max(1),
            key_release_timeout_ms: SOFT_DROP_GRACE_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Whether soft drop is currently held.
    pub fn soft_drop_held(&self) -> bool {
        self.down_held
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    /// Record a press (or auto-repeat) of a held key.
    ///
    /// Returns the immediate move for a fresh horizontal press. Repeats of a
    /// key that is already held only refresh its release timeout. Soft drop
    /// never yields an action: it only shortens gravity while held.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        if is_left(code) {
            return self.press_horizontal(HorizontalDirection::Left, GameAction::MoveLeft);
        }
        if is_right(code) {
            return self.press_horizontal(HorizontalDirection::Right, GameAction::MoveRight);
        }
        if is_down(code) {
            self.last_down_key = Instant::now();
            self.down_held = true;
        }
        None
    }

    fn press_horizontal(
        &mut self,
        direction: HorizontalDirection,
        action: GameAction,
    ) -> Option<GameAction> {
        self.last_horizontal_key = Instant::now();
        if self.horizontal == direction {
            return None;
        }
        self.horizontal = direction;
        self.das_timer = 0;
        self.arr_accumulator = 0;
        Some(action)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        if (is_left(code) && self.horizontal == HorizontalDirection::Left)
            || (is_right(code) && self.horizontal == HorizontalDirection::Right)
        {
            self.release_horizontal();
        } else if is_down(code) {
            self.down_held = false;
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }

    /// Advance repeat timers and return the auto-repeated moves for this frame.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let now = Instant::now();
        self.update_at(elapsed_ms, now)
    }

    fn update_at(&mut self, elapsed_ms: u32, now: Instant) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::<GameAction, 32>::new();
        let timeout = Duration::from_millis(u64::from(self.key_release_timeout_ms));

        // Auto-release when terminal does not emit release events.
        if self.horizontal != HorizontalDirection::None
            && now.saturating_duration_since(self.last_horizontal_key) > timeout
        {
            self.release_horizontal();
        }
        if self.down_held && now.saturating_duration_since(self.last_down_key) > timeout {
            self.down_held = false;
        }

        let action = match self.horizontal {
            HorizontalDirection::Left => GameAction::MoveLeft,
            HorizontalDirection::Right => GameAction::MoveRight,
            HorizontalDirection::None => return actions,
        };

        let prev_das = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);

        if self.das_timer >= self.das_delay {
            let excess = if prev_das < self.das_delay {
                self.das_timer - self.das_delay
            } else {
                elapsed_ms
            };
            self.arr_accumulator += excess;

            while self.arr_accumulator >= self.arr_rate {
                if actions.try_push(action).is_err() {
                    self.arr_accumulator = 0;
                    break;
                }
                self.arr_accumulator -= self.arr_rate;
            }
        }

        actions
    }

    pub fn reset(&mut self) {
        self.release_horizontal();
        self.down_held = false;
        let now = Instant::now();
        self.last_horizontal_key = now;
        self.last_down_key = now;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
