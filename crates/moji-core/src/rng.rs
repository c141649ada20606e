//! Seeded generator
//!
//! Mulberry32 over a 32-bit state. Every puzzle result and every tile grid
//! ever shared was produced by this exact sequence, so the mixing constants
//! below must never change.

/// Multiplier deriving the outcome seed from a puzzle index
pub const OUTCOME_SEED_FACTOR: u32 = 12345;
/// Multiplier deriving the grid seed from a per-play seed
pub const GRID_SEED_FACTOR: u32 = 54321;

const INCREMENT: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Deterministic stream of draws in `[0, 1)`
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a generator from a raw seed
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Generator for the outcome of puzzle `index`
    pub fn for_outcome(index: u32) -> Self {
        Self::new(outcome_seed(index))
    }

    /// Generator for the tile grid of a single play
    pub fn for_grid(play_seed: u64) -> Self {
        Self::new(grid_seed(play_seed))
    }

    /// Next raw 32-bit output
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next draw in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }

    /// Uniform index in `[0, len)`
    pub fn next_index(&mut self, len: usize) -> usize {
        (self.next_f64() * len as f64) as usize
    }
}

impl Iterator for SeededRng {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

/// Outcome seed for a puzzle index; shared by every player on the same day
pub fn outcome_seed(index: u32) -> u32 {
    index.wrapping_mul(OUTCOME_SEED_FACTOR)
}

/// Grid seed for a play; only the low 32 bits of the play seed participate
pub fn grid_seed(play_seed: u64) -> u32 {
    (play_seed as u32).wrapping_mul(GRID_SEED_FACTOR)
}
