//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization used by modern falling-block games.
//! Each bag contains one of each piece (I, J, L, O, S, T, Z), shuffled.
//! Whenever fewer than 7 pieces are queued, a fresh shuffled bag is appended,
//! so the queue always has enough pieces for the 5-piece preview.
//!
//! The shuffle RNG is seedable so tests and `--seed` runs are repeatable.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::types::{PieceKind, BAG_SIZE, NEXT_PREVIEW_LEN};

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceQueue {
    /// Upcoming pieces, front is drawn next
    queue: VecDeque<PieceKind>,
    /// RNG for shuffling
    rng: StdRng,
    seed: u64,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u64) -> Self {
        let mut queue = Self {
            queue: VecDeque::with_capacity(BAG_SIZE * 2),
            rng: StdRng::seed_from_u64(seed),
            seed,
        };
        queue.refill_if_needed();
        queue
    }

    /// Append a shuffled bag when fewer than a bag's worth of pieces remain.
    fn refill_if_needed(&mut self) {
        if self.queue.len() < BAG_SIZE {
            let mut bag = PieceKind::ALL;
            bag.shuffle(&mut self.rng);
            self.queue.extend(bag);
        }
    }

    /// Draw the next piece from the queue
    pub fn draw(&mut self) -> PieceKind {
        loop {
            self.refill_if_needed();
            if let Some(kind) = self.queue.pop_front() {
                return kind;
            }
        }
    }

    /// Peek at the next 5 pieces (for the next preview).
    pub fn peek_5(&self) -> [PieceKind; NEXT_PREVIEW_LEN] {
        let mut out = [PieceKind::I; NEXT_PREVIEW_LEN];
        for (slot, kind) in out.iter_mut().zip(self.queue.iter()) {
            *slot = *kind;
        }
        out
    }

    /// Number of queued pieces.
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Seed this queue was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a seed for the next session's queue from this queue's RNG.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }

    /// Get current queue contents for testing/debugging
    #[cfg(test)]
    pub fn queued(&self) -> Vec<PieceKind> {
        self.queue.iter().copied().collect()
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
