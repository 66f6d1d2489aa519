use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{NoiseError, Result};

// Source of uniformly distributed integers over a closed range.
// The permutation table is built from any implementor, so tests can script draws.
pub trait UniformInt {
    // Draw from [min, max], both bounds inclusive
    fn gen_int(&mut self, min: i64, max: i64) -> Result<i64>;
}

// Seedable integer RNG backed by ChaCha8
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: ChaCha8Rng,
    seed: Option<u64>, // None when seeded from OS entropy
}

impl RandomSource {
    // Entropy-seeded; draws differ from run to run
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            seed: None,
        }
    }

    // Explicit seed; the draw sequence is reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformInt for RandomSource {
    fn gen_int(&mut self, min: i64, max: i64) -> Result<i64> {
        if min > max {
            return Err(NoiseError::InvalidRange { min, max });
        }
        Ok(self.rng.gen_range(min..=max))
    }
}
