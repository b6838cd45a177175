//! RNG module - shuffled move pool for autoplay
//!
//! Implements a "9-bag" over the board cells: every cell coordinate appears
//! exactly once per pool, in shuffled order. Draws from the pool until it
//! is empty, then generates a new pool.
//!
//! Also provides a simple LCG for deterministic testing.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{Move, BOARD_CELLS};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Seed derived from the wall clock, for one autoplay session
pub fn time_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}

/// Shuffled pool of the nine board coordinates
#[derive(Debug, Clone)]
pub struct MovePool {
    /// Current permutation of moves
    moves: [Move; BOARD_CELLS],
    /// Index of the next move to hand out
    cursor: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl MovePool {
    /// Create a new pool with the given seed
    pub fn new(seed: u32) -> Self {
        let mut pool = Self {
            moves: Move::all(),
            cursor: 0,
            rng: SimpleRng::new(seed),
        };
        pool.regenerate();
        pool
    }

    /// Create a pool seeded from the current time
    pub fn from_time() -> Self {
        Self::new(time_seed())
    }

    /// Generate a new shuffled pool
    fn regenerate(&mut self) {
        self.moves = Move::all();
        self.rng.shuffle(&mut self.moves);
        self.cursor = 0;
    }

    /// True when the next call to [`MovePool::next_move`] will start a fresh pool
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= BOARD_CELLS
    }

    /// Moves not yet handed out from the current pool
    pub fn remaining(&self) -> &[Move] {
        &self.moves[self.cursor.min(BOARD_CELLS)..]
    }

    /// Draw the next move, regenerating the pool when it runs out
    pub fn next_move(&mut self) -> Move {
        if self.is_exhausted() {
            log::debug!("move pool exhausted, reshuffling");
            self.regenerate();
        }

        let mv = self.moves[self.cursor];
        self.cursor += 1;
        mv
    }
}

impl Default for MovePool {
    fn default() -> Self {
        Self::new(1)
    }
}
