use tracing::warn;

use crate::NoiseGenerator;
use crate::error::{NoiseError, Result};
use crate::fbm2::FbmConfig;
use crate::permutation::{PermutationTable, TABLE_SIZE};
use crate::rng::{RandomSource, UniformInt};
use crate::utils::{Vec2, ease, lerp};

// Rounding slack allowed before a sample counts as out of bounds
pub const BOUND_TOLERANCE: f64 = 1e-9;

// Period of the field along each axis
const PERIOD: f64 = TABLE_SIZE as f64;

// 2D gradient noise over a fixed permutation table.
// Immutable after construction, so it can be shared across threads freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Perlin2D {
    table: PermutationTable,
}

impl Perlin2D {
    // The source is only borrowed while the table is shuffled
    pub fn new(rng: &mut RandomSource) -> Result<Self> {
        Ok(Self::from_table(PermutationTable::from_source(rng)?))
    }

    pub fn with_source<R: UniformInt + ?Sized>(rng: &mut R) -> Result<Self> {
        Ok(Self::from_table(PermutationTable::shuffled(rng)?))
    }

    pub fn from_table(table: PermutationTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PermutationTable {
        &self.table
    }

    // Single octave at (x, y), in [-1, 1].
    // Zero on every integer lattice point, periodic with period 256 on both axes.
    // Non-finite coordinates give NaN.
    pub fn noise_2d(&self, x: f64, y: f64) -> f64 {
        let (sector_x, x_f) = wrap(x);
        let (sector_y, y_f) = wrap(y);

        // Offsets from each corner of the cell to the sample point
        let r_top_left = Vec2::new(x_f, y_f);
        let r_top_right = Vec2::new(x_f - 1.0, y_f);
        let r_bottom_left = Vec2::new(x_f, y_f - 1.0);
        let r_bottom_right = Vec2::new(x_f - 1.0, y_f - 1.0);

        let next_x = (sector_x + 1) & 255;
        let next_y = (sector_y + 1) & 255;
        let t = &self.table;
        let g_top_left = gradient(t.hash(sector_x, sector_y));
        let g_top_right = gradient(t.hash(next_x, sector_y));
        let g_bottom_left = gradient(t.hash(sector_x, next_y));
        let g_bottom_right = gradient(t.hash(next_x, next_y));

        let dot_top_left = r_top_left.dot(g_top_left);
        let dot_top_right = r_top_right.dot(g_top_right);
        let dot_bottom_left = r_bottom_left.dot(g_bottom_left);
        let dot_bottom_right = r_bottom_right.dot(g_bottom_right);

        let u = ease(x_f);
        let v = ease(y_f);

        let result = lerp(
            lerp(dot_top_left, dot_bottom_left, v),
            lerp(dot_top_right, dot_bottom_right, v),
            u,
        );
        debug_assert!(
            !result.is_nan() || !(x.is_finite() && y.is_finite()),
            "noise_2d({}, {}) is NaN",
            x,
            y
        );
        unit_bound(result, "noise_2d")
    }

    // Fractal Brownian motion with the default schedule:
    // amplitude 0.005 halving per octave, frequency 1.0 doubling per octave.
    // Zero octaves give 0.
    pub fn fbm(&self, x: f64, y: f64, octaves: u32) -> f64 {
        let config = FbmConfig::default().with_octaves(octaves);
        unit_bound(self.fbm_sum(&config, x, y), "fbm")
    }

    // fbm with caller-chosen parameters. The sum is never clamped:
    // leaving [-1, 1] is reported as InvariantViolation.
    pub fn fbm_with(&self, config: &FbmConfig, x: f64, y: f64) -> Result<f64> {
        config.validate()?;
        let value = self.fbm_sum(config, x, y);
        if value.abs() > 1.0 + BOUND_TOLERANCE {
            return Err(NoiseError::InvariantViolation { value, bound: 1.0 });
        }
        Ok(value)
    }

    // Raw octave sum. Octaves stop early once the amplitude underflows to zero
    // or the scaled coordinates overflow; neither can change the sum any more.
    pub(crate) fn fbm_sum(&self, config: &FbmConfig, x: f64, y: f64) -> f64 {
        if config.octaves > 0 && !(x.is_finite() && y.is_finite()) {
            return f64::NAN;
        }
        let mut result = 0.0;
        let mut amplitude = config.base_amplitude;
        let mut frequency = config.base_frequency;

        for _ in 0..config.octaves {
            let (sx, sy) = (x * frequency, y * frequency);
            if amplitude == 0.0 || !(sx.is_finite() && sy.is_finite()) {
                break;
            }
            result += amplitude * self.noise_2d(sx, sy);
            amplitude *= config.gain;
            frequency *= config.lacunarity;
        }
        result
    }
}

impl NoiseGenerator for Perlin2D {
    fn get2(&self, x: f64, y: f64) -> f64 {
        self.noise_2d(x, y)
    }
}

// Split a coordinate into (cell index, fraction) after wrapping into [0, 256)
#[inline]
fn wrap(v: f64) -> (usize, f64) {
    let mut w = v.rem_euclid(PERIOD);
    // rem_euclid may round tiny negatives up to the period itself
    if w >= PERIOD {
        w = 0.0;
    }
    let cell = w.trunc();
    (cell as usize & 255, w - cell)
}

// Four diagonal gradients picked by the low two bits of the hash
#[inline]
fn gradient(hash: u8) -> Vec2 {
    match hash % 4 {
        0 => Vec2::new(1.0, 1.0),
        1 => Vec2::new(1.0, -1.0),
        2 => Vec2::new(-1.0, 1.0),
        _ => Vec2::new(-1.0, -1.0),
    }
}

// Out-of-range samples are a defect in the gradient or weight math.
// Debug builds assert; release builds log and clamp. NaN passes through.
fn unit_bound(value: f64, kind: &'static str) -> f64 {
    if value.is_nan() {
        return value;
    }
    let escaped = value.abs() > 1.0 + BOUND_TOLERANCE;
    debug_assert!(!escaped, "{} sample {} outside [-1, 1]", kind, value);
    if escaped {
        warn!(kind, value, "sample outside [-1, 1], clamping");
    }
    value.clamp(-1.0, 1.0)
}
