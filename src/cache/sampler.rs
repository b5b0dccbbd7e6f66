//! Sampler Module
//!
//! Random source used by the probabilistic sweep. Each cache owns its own
//! sampler so tests can inject a predictable one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// == Sampler ==
/// Source of uniformly distributed draws for the eviction sweep.
pub trait Sampler: Send {
    /// Returns an integer uniformly distributed in `[0, bound)`.
    ///
    /// Callers guarantee `bound > 0`.
    fn sample(&mut self, bound: u32) -> u32;
}

// == Random Sampler ==
/// Default sampler backed by a seedable standard RNG.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: StdRng,
}

impl RandomSampler {
    /// Creates a sampler seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a sampler with a fixed seed, producing a reproducible sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Sampler for RandomSampler {
    fn sample(&mut self, bound: u32) -> u32 {
        self.rng.gen_range(0..bound)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_stays_in_range() {
        let mut sampler = RandomSampler::from_entropy();
        for _ in 0..10_000 {
            assert!(sampler.sample(1000) < 1000);
        }
    }

    #[test]
    fn test_bound_of_one_always_zero() {
        let mut sampler = RandomSampler::seeded(3);
        for _ in 0..100 {
            assert_eq!(sampler.sample(1), 0);
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RandomSampler::seeded(42);
        let mut b = RandomSampler::seeded(42);
        let left: Vec<u32> = (0..32).map(|_| a.sample(1000)).collect();
        let right: Vec<u32> = (0..32).map(|_| b.sample(1000)).collect();
        assert_eq!(left, right);
    }
}
