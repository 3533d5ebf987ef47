use crate::pieces::{Matrix, Tetromino};
use crate::types::{PieceKind, Phase, BOARD_HEIGHT, BOARD_WIDTH, NEXT_PREVIEW_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub matrix: Matrix,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Absolute board coordinates of the filled cells at row offset `y`.
    pub fn cells_at(&self, y: i8) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix
            .cells()
            .map(move |(dx, dy)| (self.x + dx, y + dy))
    }
}

/// Read-only view of a game, consumed by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Cell codes: 0 = empty, 1..=7 = `PieceKind::index() + 1`.
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub next_queue: [PieceKind; NEXT_PREVIEW_LEN],
    pub can_hold: bool,
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub high_score: u32,
    pub drop_interval_ms: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            next_queue: [PieceKind::I; NEXT_PREVIEW_LEN],
            can_hold: true,
            phase: Phase::Idle,
            score: 0,
            level: 0,
            lines: 0,
            high_score: 0,
            drop_interval_ms: 0,
        }
    }
}

impl GameSnapshot {
    /// Piece kind stored at board cell (x, y), if any.
    pub fn cell(&self, x: usize, y: usize) -> Option<PieceKind> {
        let code = *self.board.get(y)?.get(x)?;
        code.checked_sub(1)
            .and_then(|i| PieceKind::from_index(i as usize))
    }
}
