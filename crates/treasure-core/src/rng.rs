//! Random number generator abstraction.
//!
//! The expedition only ever needs a uniform pick from a tiny fixed range.
//! Production wraps an OS-seeded RNG; tests inject a scripted one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Pick a uniform index into a collection of `len` items.
    ///
    /// Returns `0` for collections of zero or one items.
    fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let max = u32::try_from(len - 1).unwrap_or(u32::MAX);
        let index = self.next_u32_range(0, max) as usize;
        index.min(len - 1)
    }
}

/// Production RNG seeded from the operating system.
#[derive(Debug)]
pub struct SystemRng(StdRng);

impl SystemRng {
    /// Creates an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Creates a reproducible RNG from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for SystemRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.0.random_range(min..=max)
    }
}
