//! The interactive session: game state, held-key input, theme and
//! preference persistence, wired together for the terminal loop.
//!
//! Nothing here touches the terminal directly, so the whole session can be
//! driven from tests with synthetic key events.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace, warn};

use crate::core::{CoreEvent, GameSnapshot, GameState};
use crate::input::{handle_key_event, should_cycle_theme, should_quit, InputHandler};
use crate::prefs::{Preferences, PrefsStore};
use crate::term::{FrameBuffer, GameView, Palette, Viewport};
use crate::types::{GameAction, Theme};

/// Whether the loop should keep running after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    game: GameState,
    input: InputHandler,
    view: GameView,
    store: PrefsStore,
    prefs: Preferences,
    /// Drives crazy palettes.
    rng: StdRng,
    snapshot: GameSnapshot,
    frame: u64,
}

impl App {
    pub fn new(seed: u64, store: PrefsStore, prefs: Preferences) -> Self {
        let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed_c010);
        let view = GameView::new(Palette::for_theme(prefs.theme, &mut rng));
        let game = GameState::new(seed).with_high_score(prefs.high_score);
        let snapshot = game.snapshot();

        Self {
            game,
            input: InputHandler::new(),
            view,
            store,
            prefs,
            rng,
            snapshot,
            frame: 0,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn palette(&self) -> &Palette {
        self.view.palette()
    }

    pub fn input(&self) -> &InputHandler {
        &self.input
    }

    /// Handle one terminal key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind == KeyEventKind::Release {
            self.input.handle_key_release(key.code);
            return Flow::Continue;
        }

        if should_quit(key) {
            self.persist_high_score();
            return Flow::Quit;
        }

        if should_cycle_theme(key) {
            self.set_theme(self.prefs.theme.next());
            return Flow::Continue;
        }

        if let Some(action) = self.input.handle_key_press(key.code) {
            self.apply(action);
        }

        if let Some(action) = handle_key_event(key) {
            match action {
                // Held keys go through the input handler above.
                GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDrop => {}
                _ => self.apply(action),
            }
        }

        self.drain_events();
        Flow::Continue
    }

    /// Convenience for a plain key press.
    pub fn press(&mut self, code: KeyCode) -> Flow {
        self.handle_key(KeyEvent::from(code))
    }

    /// Advance one loop step of `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.frame = self.frame.wrapping_add(1);

        for action in self.input.update(elapsed_ms) {
            self.game.apply_action(action);
        }
        self.game.tick(elapsed_ms, self.input.soft_drop_held());
        self.drain_events();
    }

    pub fn render_into(&mut self, viewport: Viewport, fb: &mut FrameBuffer) {
        self.game.snapshot_into(&mut self.snapshot);
        self.view
            .render_into(&self.snapshot, self.frame, viewport, fb);
    }

    /// Select a theme, rebuild the palette and persist the choice.
    pub fn set_theme(&mut self, theme: Theme) {
        self.view
            .set_palette(Palette::for_theme(theme, &mut self.rng));
        if self.prefs.theme != theme {
            info!(theme = theme.as_str(), "theme changed");
            self.prefs.theme = theme;
            self.save_prefs();
        }
    }

    fn apply(&mut self, action: GameAction) {
        trace!(action = action.as_str(), phase = self.game.phase().as_str(), "action");
        if action == GameAction::Restart {
            self.input.reset();
        }
        self.game.apply_action(action);
    }

    fn drain_events(&mut self) {
        for event in self.game.take_events() {
            match event {
                CoreEvent::Locked {
                    kind,
                    lines_cleared,
                    line_clear_score,
                } => {
                    debug!(
                        piece = kind.as_str(),
                        lines_cleared, line_clear_score, "piece locked"
                    );
                    self.persist_high_score();
                }
                CoreEvent::GameOver { score, lines } => {
                    debug!(score, lines, "final result");
                    self.input.reset();
                    self.persist_high_score();
                }
                CoreEvent::Started
                | CoreEvent::Paused
                | CoreEvent::Resumed
                | CoreEvent::LevelUp { .. } => {}
            }
        }
    }

    fn persist_high_score(&mut self) {
        let high = self.game.high_score();
        if high > self.prefs.high_score {
            info!(high_score = high, "new high score");
            self.prefs.high_score = high;
            self.save_prefs();
        }
    }

    fn save_prefs(&self) {
        if let Err(e) = self.store.save(&self.prefs) {
            warn!(error = %e, "failed to save preferences");
        }
    }
}
