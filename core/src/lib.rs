// terra: seeded 2D gradient noise and fractal Brownian motion
pub mod error;
pub mod fbm2;
pub mod permutation;
pub mod perlin2;
pub mod rng;
pub mod utils;

pub use error::{NoiseError, Result};
pub use fbm2::{Fbm2D, FbmConfig};
pub use permutation::PermutationTable;
pub use perlin2::Perlin2D;
pub use rng::{RandomSource, UniformInt};
pub use utils::{flatten2, normalize2, sample_grid};

// Anything that can be sampled as a 2D scalar field
pub trait NoiseGenerator {
    // Sample 2D noise at (x, y).
    fn get2(&self, x: f64, y: f64) -> f64;
}
