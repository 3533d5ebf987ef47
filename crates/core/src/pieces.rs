//! Pieces module - tetromino matrices, spawn placement and kicked rotation
//!
//! Every piece is a small square matrix of filled/empty cells (I: 4x4, O: 2x2,
//! the rest 3x3) positioned by the board coordinates of its top-left corner.
//! Rotation turns the whole matrix by 90° and then tries a short list of
//! horizontal offsets until one fits.

use crate::types::{PieceKind, Turn, BOARD_WIDTH, KICK_OFFSETS};

/// Largest matrix side length (the I piece).
pub const MAX_MATRIX: usize = 4;

/// Square occupancy matrix of a piece in one orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    size: u8,
    rows: [[bool; MAX_MATRIX]; MAX_MATRIX],
}

impl Matrix {
    fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        let mut m = Self {
            size: N as u8,
            rows: [[false; MAX_MATRIX]; MAX_MATRIX],
        };
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                m.rows[y][x] = v != 0;
            }
        }
        m
    }

    /// The spawn orientation of a piece kind.
    pub fn spawn(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_rows([
                [0, 0, 0, 0],
                [1, 1, 1, 1],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ]),
            PieceKind::J => Self::from_rows([
                [1, 0, 0],
                [1, 1, 1],
                [0, 0, 0],
            ]),
            PieceKind::L => Self::from_rows([
                [0, 0, 1],
                [1, 1, 1],
                [0, 0, 0],
            ]),
            PieceKind::O => Self::from_rows([
                [1, 1],
                [1, 1],
            ]),
            PieceKind::S => Self::from_rows([
                [0, 1, 1],
                [1, 1, 0],
                [0, 0, 0],
            ]),
            PieceKind::T => Self::from_rows([
                [0, 1, 0],
                [1, 1, 1],
                [0, 0, 0],
            ]),
            PieceKind::Z => Self::from_rows([
                [1, 1, 0],
                [0, 1, 1],
                [0, 0, 0],
            ]),
        }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Whether cell (x, y) of the matrix is filled. Out of range is empty.
    pub fn filled(&self, x: usize, y: usize) -> bool {
        x < self.size() && y < self.size() && self.rows[y][x]
    }

    /// Matrix-relative coordinates of the filled cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |y| {
            (0..n)
                .filter(move |&x| self.rows[y][x])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Index of the first row holding a filled cell.
    pub fn top_padding(&self) -> usize {
        (0..self.size())
            .find(|&y| self.rows[y].iter().any(|&v| v))
            .unwrap_or(0)
    }

    /// The matrix turned by 90°.
    pub fn rotated(&self, turn: Turn) -> Self {
        let n = self.size();
        let mut out = Self {
            size: self.size,
            rows: [[false; MAX_MATRIX]; MAX_MATRIX],
        };
        for y in 0..n {
            for x in 0..n {
                match turn {
                    Turn::Cw => out.rows[x][n - 1 - y] = self.rows[y][x],
                    Turn::Ccw => out.rows[n - 1 - x][y] = self.rows[y][x],
                }
            }
        }
        out
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub matrix: Matrix,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new piece at its spawn placement.
    ///
    /// The matrix is horizontally centred and lifted so its first filled row
    /// lands on board row 0.
    pub fn new(kind: PieceKind) -> Self {
        let matrix = Matrix::spawn(kind);
        let (x, y) = spawn_position(&matrix);
        Self { kind, matrix, x, y }
    }

    /// Absolute board coordinates of the filled cells.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// A copy moved by (dx, dy).
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Spawn offset for a matrix: `(COLS / 2 - size / 2, -top_padding)`.
pub fn spawn_position(matrix: &Matrix) -> (i8, i8) {
    let x = (BOARD_WIDTH as i8 / 2) - (matrix.size() as i8 / 2);
    let y = -(matrix.top_padding() as i8);
    (x, y)
}

/// Try to rotate a piece with wall kicks
///
/// `is_free` reports whether a single board cell may hold a piece cell.
/// Returns the rotated piece and the horizontal kick that was applied, or
/// `None` if no offset in [`KICK_OFFSETS`] fits.
pub fn try_rotate(
    piece: &Tetromino,
    turn: Turn,
    is_free: impl Fn(i8, i8) -> bool,
) -> Option<(Tetromino, i8)> {
    let rotated = Tetromino {
        matrix: piece.matrix.rotated(turn),
        ..*piece
    };

    for &dx in KICK_OFFSETS.iter() {
        let candidate = rotated.shifted(dx, 0);
        if candidate.cells().all(|(x, y)| is_free(x, y)) {
            return Some((candidate, dx));
        }
    }

    None
}
