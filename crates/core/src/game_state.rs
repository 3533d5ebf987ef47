//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, bag and scoring.
//! It handles gravity timing, piece movement, rotation, hold, line clears and
//! the session lifecycle (`Idle → Running ⇄ Paused → GameOver → Running`).

use tracing::{debug, info};

use crate::pieces::{try_rotate, Tetromino};
use crate::rng::PieceQueue;
use crate::scoring::{
    calculate_drop_score, calculate_level, calculate_line_score, get_drop_interval_ms,
    get_soft_drop_interval_ms,
};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;
use crate::Board;

/// Notable transition, drained by the loop driver after each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreEvent {
    Started,
    Paused,
    Resumed,
    Locked {
        kind: PieceKind,
        lines_cleared: u32,
        line_clear_score: u32,
    },
    LevelUp {
        level: u32,
    },
    GameOver {
        score: u32,
        lines: u32,
    },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    hold: Option<PieceKind>,
    can_hold: bool,
    next_queue: [PieceKind; NEXT_PREVIEW_LEN],
    piece_queue: PieceQueue,
    phase: Phase,
    /// Monotonic id for spawned pieces in this session.
    piece_id: u32,
    score: u32,
    level: u32,
    lines: u32,
    high_score: u32,
    drop_interval_ms: u32,
    drop_timer_ms: u32,
    events: Vec<CoreEvent>,
}

impl GameState {
    /// Create an idle game with the given bag seed
    pub fn new(seed: u64) -> Self {
        let piece_queue = PieceQueue::new(seed);
        let next_queue = piece_queue.peek_5();

        Self {
            board: Board::new(),
            active: None,
            hold: None,
            can_hold: true,
            next_queue,
            piece_queue,
            phase: Phase::Idle,
            piece_id: 0,
            score: 0,
            level: 0,
            lines: 0,
            high_score: 0,
            drop_interval_ms: get_drop_interval_ms(0),
            drop_timer_ms: 0,
            events: Vec::new(),
        }
    }

    /// Carry a persisted high score into the session.
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self
    }

    /// Start the first game. No-op unless idle.
    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        self.begin_session();
    }

    /// Discard the current session and start a fresh one from any phase.
    pub fn restart(&mut self) {
        let seed = self.piece_queue.next_seed();
        self.board.clear();
        self.piece_queue = PieceQueue::new(seed);
        self.hold = None;
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.level = 0;
        self.piece_id = 0;
        self.begin_session();
    }

    fn begin_session(&mut self) {
        self.drop_interval_ms = get_drop_interval_ms(self.level);
        self.drop_timer_ms = 0;
        self.can_hold = true;
        self.phase = Phase::Running;
        info!(seed = self.piece_queue.seed(), "game started");
        self.events.push(CoreEvent::Started);
        self.spawn_piece();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_queue(&self) -> &[PieceKind; NEXT_PREVIEW_LEN] {
        &self.next_queue
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Gravity interval for the current level.
    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    /// Take the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<CoreEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.hold;
        out.next_queue = self.next_queue;
        out.can_hold = self.can_hold;
        out.phase = self.phase;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.high_score = self.high_score;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    fn end_game(&mut self) {
        self.phase = Phase::GameOver;
        self.active = None;
        info!(score = self.score, lines = self.lines, "game over");
        self.events.push(CoreEvent::GameOver {
            score: self.score,
            lines: self.lines,
        });
    }

    /// Spawn a new piece from the queue
    ///
    /// Returns false (and ends the game) if the spawn placement is blocked.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.piece_queue.draw();
        self.next_queue = self.piece_queue.peek_5();

        let piece = Tetromino::new(kind);
        if !self.board.fits(piece.cells()) {
            self.end_game();
            return false;
        }

        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        self.can_hold = true;
        true
    }

    /// Try to move the active piece
    ///
    /// The move is applied only if every cell of the shifted piece is free.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if self.board.fits(moved.cells()) {
            self.active = Some(moved);
            return true;
        }

        false
    }

    /// Check if piece can move in given direction
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        self.active
            .map(|p| self.board.fits(p.shifted(dx, dy).cells()))
            .unwrap_or(false)
    }

    /// Try to rotate the active piece, kicking sideways if needed
    pub fn try_rotate(&mut self, turn: Turn) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let board = &self.board;
        match try_rotate(&active, turn, |x, y| board.is_free(x, y)) {
            Some((rotated, kick)) => {
                if kick != 0 {
                    debug!(kick, "rotation kicked");
                }
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Hard drop the active piece to the bottom and lock it
    ///
    /// Returns the number of rows descended.
    pub fn hard_drop(&mut self) -> u32 {
        if self.active.is_none() {
            return 0;
        }

        let mut rows: u32 = 0;
        while self.try_move(0, 1) {
            rows += 1;
        }

        self.add_score(calculate_drop_score(rows));
        self.lock_piece();
        rows
    }

    /// Swap active piece with hold piece
    ///
    /// Allowed once per spawned piece. An empty slot stashes the active piece
    /// and spawns the next one from the queue.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }

        let Some(active) = self.active else {
            return false;
        };

        match self.hold.replace(active.kind) {
            Some(held) => {
                let piece = Tetromino::new(held);
                if !self.board.fits(piece.cells()) {
                    self.end_game();
                    return true;
                }
                self.active = Some(piece);
            }
            None => {
                self.active = None;
                if !self.spawn_piece() {
                    return true;
                }
            }
        }

        self.can_hold = false;
        true
    }

    /// Lock the active piece onto the board and handle line clears
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.merge(active.cells(), active.kind);

        let cleared_rows = self.board.clear_full_rows();
        let lines_cleared = cleared_rows.len();

        let mut line_clear_score = 0;
        if lines_cleared > 0 {
            line_clear_score = calculate_line_score(lines_cleared, self.level);
            self.add_score(line_clear_score);
            self.lines += lines_cleared as u32;

            let level = calculate_level(self.lines);
            if level > self.level {
                self.level = level;
                self.drop_interval_ms = get_drop_interval_ms(level);
                info!(level, interval_ms = self.drop_interval_ms, "level up");
                self.events.push(CoreEvent::LevelUp { level });
            }
        }

        self.events.push(CoreEvent::Locked {
            kind: active.kind,
            lines_cleared: lines_cleared as u32,
            line_clear_score,
        });

        self.spawn_piece();
    }

    /// Calculate the ghost piece Y position (where piece would land)
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;

        let mut drop_distance: i8 = 0;
        while self.board.fits(active.shifted(0, drop_distance + 1).cells()) {
            drop_distance += 1;
        }

        Some(active.y + drop_distance)
    }

    /// Gravity interval actually in effect for this frame.
    pub fn effective_interval_ms(&self, soft_drop: bool) -> u32 {
        if soft_drop {
            get_soft_drop_interval_ms(self.drop_interval_ms)
        } else {
            self.drop_interval_ms
        }
    }

    /// Main game tick - advance the drop timer and apply gravity
    ///
    /// When the accumulated time exceeds the interval, the piece moves down one
    /// row, or locks if it cannot. Returns true if gravity fired.
    pub fn tick(&mut self, elapsed_ms: u32, soft_drop: bool) -> bool {
        if !self.phase.accepts_piece_input() || self.active.is_none() {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms <= self.effective_interval_ms(soft_drop) {
            return false;
        }

        self.drop_timer_ms = 0;
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        true
    }

    /// Toggle between running and paused. Ignored in other phases.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                info!("paused");
                self.events.push(CoreEvent::Paused);
                true
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                info!("resumed");
                self.events.push(CoreEvent::Resumed);
                true
            }
            Phase::Idle | Phase::GameOver => false,
        }
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => return self.toggle_pause(),
            GameAction::Restart => {
                if self.phase == Phase::Idle {
                    self.start();
                } else {
                    self.restart();
                }
                return true;
            }
            _ => {}
        }

        if !self.phase.accepts_piece_input() {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.try_move(0, 1),
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.try_rotate(Turn::Cw),
            GameAction::RotateCcw => self.try_rotate(Turn::Ccw),
            GameAction::Hold => self.hold(),
            GameAction::Pause | GameAction::Restart => false,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    /// Fill row `y` except for the listed columns.
    fn fill_row_except(board: &mut Board, y: i8, holes: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            if !holes.contains(&x) {
                board.set(x, y, Some(PieceKind::Z));
            }
        }
    }

    /// Vertical I piece whose cells sit in column `col`, rows `top..top+4`.
    fn vertical_i(col: i8, top: i8) -> Tetromino {
        let mut piece = Tetromino::new(PieceKind::I);
        piece.matrix = piece.matrix.rotated(Turn::Cw);
        // Clockwise vertical I occupies matrix column 2.
        piece.x = col - 2;
        piece.y = top;
        piece
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 0);
        assert_eq!(state.lines, 0);
        assert!(state.active.is_none());
        assert!(state.hold.is_none());
        assert_eq!(state.drop_interval_ms, 1000);
    }

    #[test]
    fn test_game_start() {
        let mut state = GameState::new(12345);
        state.start();
        assert_eq!(state.phase, Phase::Running);
        assert!(state.active.is_some());
        assert_eq!(state.piece_id, 1);
        assert_eq!(state.take_events(), vec![CoreEvent::Started]);
    }

    #[test]
    fn test_spawn_piece_follows_preview() {
        let mut state = running(12345);
        let next_kind = state.next_queue[0];

        state.active = None;
        assert!(state.spawn_piece());
        assert_eq!(state.active.unwrap().kind, next_kind);
        assert_eq!(state.piece_id, 2);
    }

    #[test]
    fn movement_is_ignored_unless_running() {
        let mut state = GameState::new(1);
        assert!(!state.apply_action(GameAction::MoveLeft));

        state.start();
        assert!(state.apply_action(GameAction::Pause));
        let before = state.active;
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::HardDrop));
        assert_eq!(state.active, before);
    }

    #[test]
    fn pause_toggles_only_between_running_and_paused() {
        let mut state = GameState::new(1);
        assert!(!state.toggle_pause());
        state.start();
        assert!(state.toggle_pause());
        assert_eq!(state.phase, Phase::Paused);
        assert!(state.toggle_pause());
        assert_eq!(state.phase, Phase::Running);
    }

    #[test]
    fn paused_game_does_not_fall() {
        let mut state = running(1);
        state.toggle_pause();
        let y = state.active.unwrap().y;
        assert!(!state.tick(5000, false));
        assert_eq!(state.active.unwrap().y, y);
    }

    #[test]
    fn gravity_fires_only_after_interval_is_exceeded() {
        let mut state = running(1);
        let y = state.active.unwrap().y;

        assert!(!state.tick(1000, false));
        assert_eq!(state.active.unwrap().y, y);

        assert!(state.tick(1, false));
        assert_eq!(state.active.unwrap().y, y + 1);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn soft_drop_shortens_the_interval() {
        let mut state = running(1);
        let y = state.active.unwrap().y;
        assert!(state.tick(167, true));
        assert_eq!(state.active.unwrap().y, y + 1);
        assert!(!state.tick(167, false));
    }

    #[test]
    fn gravity_locks_a_grounded_piece() {
        let mut state = running(7);
        while state.try_move(0, 1) {}
        let first = state.piece_id;

        assert!(state.tick(1001, false));
        assert_eq!(state.piece_id, first + 1);
        assert_eq!(state.board.filled_count(), 4);
    }

    #[test]
    fn test_try_move_collision() {
        let mut state = running(12345);

        let mut moved = 0;
        for _ in 0..10 {
            if state.try_move(-1, 0) {
                moved += 1;
            }
        }
        assert!(moved <= 5);
        assert!(!state.can_move(-1, 0));
    }

    #[test]
    fn four_rotations_restore_the_piece() {
        let mut state = running(12345);
        state.active = Some(Tetromino::new(PieceKind::T).shifted(0, 5));
        let start = state.active.unwrap();

        for _ in 0..4 {
            assert!(state.try_rotate(Turn::Cw));
        }
        assert_eq!(state.active.unwrap(), start);
    }

    #[test]
    fn hard_drop_o_on_empty_board() {
        let mut state = running(1);
        state.active = Some(Tetromino::new(PieceKind::O));
        let score_before = state.score;

        let rows = state.hard_drop();

        assert_eq!(rows, 18);
        assert_eq!(state.score - score_before, 36);
        assert!(state.board.is_occupied(4, 19));
        assert!(state.board.is_occupied(5, 19));
        assert!(state.board.is_occupied(4, 18));
        assert!(state.board.is_occupied(5, 18));
        assert_eq!(state.lines, 0);
        assert!(state.active.is_some());
    }

    #[test]
    fn single_line_clear_scores_by_level() {
        let mut state = running(3);
        state.level = 2;
        fill_row_except(&mut state.board, 19, &[0]);
        state.board.set(5, 18, Some(PieceKind::T));
        state.active = Some(vertical_i(0, 16));
        state.take_events();

        state.lock_piece();

        assert_eq!(state.lines, 1);
        assert_eq!(state.score, 40 * 3);
        // Row 18 shifted down, the three I cells above it shifted too.
        assert!(state.board.is_occupied(5, 19));
        assert!(state.board.is_occupied(0, 19));
        assert!(state.board.is_occupied(0, 17));
        assert!(!state.board.is_occupied(0, 16));
        assert!(state.take_events().contains(&CoreEvent::Locked {
            kind: PieceKind::I,
            lines_cleared: 1,
            line_clear_score: 120,
        }));
    }

    #[test]
    fn tetris_clears_four_rows() {
        let mut state = running(3);
        for y in 16..20 {
            fill_row_except(&mut state.board, y, &[9]);
        }
        state.board.set(3, 15, Some(PieceKind::L));
        state.active = Some(vertical_i(9, 16));

        state.lock_piece();

        assert_eq!(state.lines, 4);
        assert_eq!(state.score, 1200);
        assert_eq!(state.board.filled_count(), 1);
        assert!(state.board.is_occupied(3, 19));
    }

    #[test]
    fn double_clear_scores_at_current_level() {
        let mut state = running(5);
        state.level = 3;
        state.lines = 30;
        for y in 18..20 {
            fill_row_except(&mut state.board, y, &[9]);
        }
        state.active = Some(vertical_i(9, 16));
        state.take_events();

        state.lock_piece();

        assert_eq!(state.lines, 32);
        assert_eq!(state.score, 100 * 4);
        assert_eq!(state.level, 3);
        // The two I cells above the cleared rows drop to the floor.
        assert!(state.board.is_occupied(9, 19));
        assert!(state.board.is_occupied(9, 18));
        assert_eq!(state.board.filled_count(), 2);
        assert!(state.take_events().contains(&CoreEvent::Locked {
            kind: PieceKind::I,
            lines_cleared: 2,
            line_clear_score: 400,
        }));
    }

    #[test]
    fn triple_clear_uses_level_before_the_clear() {
        let mut state = running(6);
        state.level = 1;
        state.lines = 19;
        for y in 17..20 {
            fill_row_except(&mut state.board, y, &[9]);
        }
        state.active = Some(vertical_i(9, 16));
        state.take_events();

        state.lock_piece();

        assert_eq!(state.lines, 22);
        // 300 x (1 + 1), not x (2 + 1).
        assert_eq!(state.score, 600);
        assert_eq!(state.level, 2);
        assert_eq!(state.board.filled_count(), 1);
        assert!(state.board.is_occupied(9, 19));
        let events = state.take_events();
        assert!(events.contains(&CoreEvent::Locked {
            kind: PieceKind::I,
            lines_cleared: 3,
            line_clear_score: 600,
        }));
        assert!(events.contains(&CoreEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn level_up_recomputes_interval() {
        let mut state = running(3);
        state.lines = 9;
        fill_row_except(&mut state.board, 19, &[0]);
        state.active = Some(vertical_i(0, 16));
        state.take_events();

        state.lock_piece();

        assert_eq!(state.level, 1);
        assert_eq!(state.drop_interval_ms, 920);
        // Points use the level before the clear.
        assert_eq!(state.score, 40);
        assert!(state.take_events().contains(&CoreEvent::LevelUp { level: 1 }));
    }

    #[test]
    fn hold_once_per_piece() {
        let mut state = running(12345);
        let first = state.active.unwrap().kind;

        assert!(state.hold());
        assert_eq!(state.hold, Some(first));
        assert!(!state.can_hold);

        let second = state.active.unwrap();
        assert!(!state.hold());
        assert_eq!(state.active.unwrap(), second);
        assert_eq!(state.hold, Some(first));
    }

    #[test]
    fn hold_swaps_after_lock() {
        let mut state = running(12345);
        let first = state.active.unwrap().kind;
        state.hold();
        state.hard_drop();
        assert!(state.can_hold);

        let current = state.active.unwrap().kind;
        assert!(state.hold());
        assert_eq!(state.active.unwrap().kind, first);
        assert_eq!(state.active.unwrap(), Tetromino::new(first));
        assert_eq!(state.hold, Some(current));
    }

    #[test]
    fn blocked_spawn_ends_the_game() {
        let mut state = running(5);
        for y in 0..2 {
            fill_row_except(&mut state.board, y, &[0]);
        }
        state.take_events();

        state.active = None;
        assert!(!state.spawn_piece());
        assert_eq!(state.phase, Phase::GameOver);
        assert!(state.active.is_none());
        assert!(matches!(
            state.take_events().as_slice(),
            [CoreEvent::GameOver { .. }]
        ));

        // Nothing moves after game over.
        assert!(!state.tick(5000, false));
        assert!(!state.apply_action(GameAction::Hold));
    }

    #[test]
    fn blocked_hold_swap_ends_the_game() {
        let mut state = running(5);
        state.hold = Some(PieceKind::O);
        // O spawns at columns 4-5, rows 0-1.
        state.board.set(4, 0, Some(PieceKind::Z));
        state.active = Some(Tetromino::new(PieceKind::I).shifted(0, 10));

        assert!(state.hold());
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn restart_keeps_high_score_only() {
        let mut state = GameState::new(1).with_high_score(500);
        state.start();
        state.hard_drop();
        state.hold();
        let score = state.score;
        assert!(score > 0);

        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert!(state.hold.is_none());
        assert_eq!(state.board.filled_count(), 0);
        assert_eq!(state.high_score, 500);
    }

    #[test]
    fn high_score_follows_score() {
        let mut state = GameState::new(1).with_high_score(10);
        state.start();
        state.active = Some(Tetromino::new(PieceKind::O));
        state.hard_drop();
        assert_eq!(state.score, 36);
        assert_eq!(state.high_score, 36);
    }

    #[test]
    fn restart_from_game_over() {
        let mut state = running(5);
        state.end_game();
        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.phase, Phase::Running);
        assert!(state.active.is_some());
    }

    #[test]
    fn ghost_lands_on_the_floor() {
        let mut state = running(1);
        state.active = Some(Tetromino::new(PieceKind::O));
        assert_eq!(state.ghost_y(), Some(18));
        state.board.set(4, 10, Some(PieceKind::J));
        assert_eq!(state.ghost_y(), Some(8));
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut state = running(1);
        state.active = Some(Tetromino::new(PieceKind::O));
        let snap = state.snapshot();
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.active.unwrap().kind, PieceKind::O);
        assert_eq!(snap.ghost_y, Some(18));
        assert_eq!(snap.next_queue, state.next_queue);
    }
}
