//! Injectable randomness
//!
//! Every random draw in the simulation (variant picks, spawn placement, mouse
//! wander) goes through [`RandomSource`] so a run can be replayed from a seed
//! or scripted exactly in tests.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniform samples in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Uniform sample in `[lo, hi)`; a degenerate range yields `lo`
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + self.next_unit() * (hi - lo)
    }

    /// Uniform index in `0..n` (`n` must be non-zero)
    fn index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "index requires a non-empty range");
        ((self.next_unit() * n as f32) as usize).min(n.saturating_sub(1))
    }
}

impl RandomSource for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Adapter for any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f32 {
        self.0.random::<f32>()
    }
}

/// Seeded production generator
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}
