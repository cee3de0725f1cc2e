//! Seeded randomness for move ordering and obstacle placement.
//!
//! Built on a Park-Miller MINSTD linear congruential generator:
//!
//! - Multiplier (a): 48271
//! - Modulus (m): 2^31 - 1 = 2147483647
//!
//! Pure integer arithmetic throughout, so the same seed yields the same
//! sequence on every platform.
//!
//! Reference: https://en.wikipedia.org/wiki/Lehmer_random_number_generator

use crate::grid::{Cell, Direction};

const MULTIPLIER: u64 = 48271;
const MODULUS: u64 = 2_147_483_647; // 2^31 - 1

/// Deterministic source of direction orderings and obstacle samples.
///
/// Same seed always produces the same sequence of shuffles and samples.
#[derive(Debug, Clone)]
pub struct RandomMoveSource {
    state: u32,
}

impl RandomMoveSource {
    /// Create a new source with the given seed.
    ///
    /// If seed is 0, it's replaced with 1 to avoid the degenerate
    /// all-zero sequence.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Advance the LCG state.
    fn advance(&mut self) {
        // u64 intermediate avoids overflow during multiplication.
        self.state = ((self.state as u64 * MULTIPLIER) % MODULUS) as u32;
    }

    /// Random index in `[0, len)`, integer arithmetic only.
    fn choice_index(&mut self, len: usize) -> usize {
        self.advance();
        ((self.state as u64 * len as u64) / MODULUS) as usize
    }

    /// A fresh uniformly random permutation of the four directions.
    ///
    /// Every call draws a new permutation; the engine relies on this when
    /// it lazily stocks a frame's pending moves.
    pub fn shuffled_directions(&mut self) -> [Direction; 4] {
        let mut dirs = Direction::ALL;
        // Fisher-Yates, high index down
        for i in (1..dirs.len()).rev() {
            let j = self.choice_index(i + 1);
            dirs.swap(i, j);
        }
        dirs
    }

    /// Draw `count` distinct cells from `candidates`, uniformly without
    /// replacement. Any `count` beyond the candidate list is ignored;
    /// callers validate bounds before sampling.
    pub fn sample_cells(&mut self, mut candidates: Vec<Cell>, count: usize) -> Vec<Cell> {
        let count = count.min(candidates.len());
        // Partial Fisher-Yates: after i swaps the prefix [0, i] is a
        // uniform draw without replacement.
        for i in 0..count {
            let j = i + self.choice_index(candidates.len() - i);
            candidates.swap(i, j);
        }
        candidates.truncate(count);
        candidates
    }
}
