//! Generator module - buffered random piece supply
//!
//! Pieces are drawn uniformly at random, with replacement, from the seven
//! standard tetrominoes. The queue always holds at least one piece after a
//! draw, so the "next" piece can be previewed before it becomes current.
//!
//! The random source is owned by the generator and injectable, so a fixed
//! seed reproduces the same piece sequence.

use std::collections::VecDeque;
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::pieces::{standard_pieces, Piece};

/// Pieces queued at construction
const INITIAL_BUFFER_SIZE: usize = 2;

/// A draw tops the queue up first when it holds this many pieces or fewer
const MIN_BUFFER_SIZE: usize = 1;

#[derive(Debug, Clone)]
pub struct PieceGenerator<R: Rng = ChaCha8Rng> {
    pool: Vec<Arc<Piece>>,
    queue: VecDeque<Arc<Piece>>,
    rng: R,
}

impl PieceGenerator<ChaCha8Rng> {
    /// Generator with a reproducible sequence for `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Generator seeded from the thread-local entropy source
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }
}

impl Default for PieceGenerator<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PieceGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        let mut generator = Self {
            pool: standard_pieces().into_iter().map(Arc::new).collect(),
            queue: VecDeque::with_capacity(INITIAL_BUFFER_SIZE + 1),
            rng,
        };
        for _ in 0..INITIAL_BUFFER_SIZE {
            generator.push_random();
        }
        generator
    }

    fn random_piece(&mut self) -> Arc<Piece> {
        let index = self.rng.random_range(0..self.pool.len());
        Arc::clone(&self.pool[index])
    }

    fn push_random(&mut self) {
        let piece = self.random_piece();
        self.queue.push_back(piece);
    }

    /// Take the front piece, topping the queue up first if it is running low
    pub fn get_brick(&mut self) -> Arc<Piece> {
        if self.queue.len() <= MIN_BUFFER_SIZE {
            self.push_random();
        }
        self.queue
            .pop_front()
            .unwrap_or_else(|| self.random_piece())
    }

    /// Peek at the piece the next [`get_brick`](Self::get_brick) will return
    pub fn next_brick(&self) -> Option<&Arc<Piece>> {
        self.queue.front()
    }

    /// Number of buffered pieces
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drop the buffered pieces and queue a fresh pair
    pub fn reset(&mut self) {
        self.queue.clear();
        for _ in 0..INITIAL_BUFFER_SIZE {
            self.push_random();
        }
    }
}
