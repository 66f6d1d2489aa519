use crate::NoiseGenerator;
use crate::error::{NoiseError, Result};
use crate::perlin2::Perlin2D;

pub const DEFAULT_BASE_AMPLITUDE: f64 = 0.005;
pub const DEFAULT_BASE_FREQUENCY: f64 = 1.0;
pub const DEFAULT_LACUNARITY: f64 = 2.0;
pub const DEFAULT_GAIN: f64 = 0.5;

// Octave schedule for fractal Brownian motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FbmConfig {
    pub base_amplitude: f64, // weight of the first octave
    pub base_frequency: f64, // coordinate scale of the first octave
    pub lacunarity: f64,     // frequency multiplier per octave
    pub gain: f64,           // amplitude multiplier per octave
    pub octaves: u32,
}

impl Default for FbmConfig {
    fn default() -> Self {
        Self {
            base_amplitude: DEFAULT_BASE_AMPLITUDE,
            base_frequency: DEFAULT_BASE_FREQUENCY,
            lacunarity: DEFAULT_LACUNARITY,
            gain: DEFAULT_GAIN,
            octaves: 0,
        }
    }
}

impl FbmConfig {
    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    pub fn with_base_amplitude(mut self, amplitude: f64) -> Self {
        self.base_amplitude = amplitude;
        self
    }

    pub fn with_base_frequency(mut self, frequency: f64) -> Self {
        self.base_frequency = frequency;
        self
    }

    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("base_amplitude", self.base_amplitude),
            ("base_frequency", self.base_frequency),
            ("lacunarity", self.lacunarity),
            ("gain", self.gain),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(NoiseError::InvalidConfig(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    // Largest magnitude the octave sum can reach: the partial geometric series
    // a0 * (1 - g^n) / (1 - g), or a0 * n when g == 1
    pub fn amplitude_bound(&self) -> f64 {
        let n = self.octaves as f64;
        if (self.gain - 1.0).abs() < f64::EPSILON {
            self.base_amplitude * n
        } else {
            self.base_amplitude * (1.0 - self.gain.powf(n)) / (1.0 - self.gain)
        }
    }
}

// A Perlin2D engine paired with a fixed octave schedule, so fbm can be
// handed to anything that samples a NoiseGenerator.
// The config is validated once in `new` and cannot change afterwards.
pub struct Fbm2D<'a> {
    engine: &'a Perlin2D,
    config: FbmConfig,
}

impl<'a> Fbm2D<'a> {
    pub fn new(engine: &'a Perlin2D, config: FbmConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { engine, config })
    }

    pub fn engine(&self) -> &'a Perlin2D {
        self.engine
    }

    pub fn config(&self) -> &FbmConfig {
        &self.config
    }
}

impl NoiseGenerator for Fbm2D<'_> {
    fn get2(&self, x: f64, y: f64) -> f64 {
        if self.config == FbmConfig::default().with_octaves(self.config.octaves) {
            return self.engine.fbm(x, y, self.config.octaves);
        }
        // Custom schedules are not clamped; an escape reads back as the raw sum
        self.engine.fbm_sum(&self.config, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::{Fbm2D, FbmConfig};
    use crate::NoiseGenerator;
    use crate::perlin2::Perlin2D;
    use crate::rng::RandomSource;

    #[test]
    fn default_schedule() {
        let cfg = FbmConfig::default();
        assert_eq!(cfg.base_amplitude, 0.005);
        assert_eq!(cfg.base_frequency, 1.0);
        assert_eq!(cfg.lacunarity, 2.0);
        assert_eq!(cfg.gain, 0.5);
        assert_eq!(cfg.octaves, 0);
    }

    #[test]
    fn bound_converges_below_twice_base() {
        let cfg = FbmConfig::default().with_octaves(64);
        assert!(cfg.amplitude_bound() < 0.01 + 1e-12);
        assert_eq!(FbmConfig::default().amplitude_bound(), 0.0);
        let flat = FbmConfig::default().with_gain(1.0).with_octaves(4);
        assert!((flat.amplitude_bound() - 0.02).abs() < 1e-15);
    }

    #[test]
    fn bound_holds_for_huge_octave_counts() {
        for octaves in [i32::MAX as u32, i32::MAX as u32 + 1, u32::MAX] {
            let bound = FbmConfig::default().with_octaves(octaves).amplitude_bound();
            assert!((bound - 0.01).abs() < 1e-15, "{} octaves: bound {}", octaves, bound);
        }
        let amplifying = FbmConfig::default().with_gain(2.0).with_octaves(u32::MAX);
        assert!(amplifying.amplitude_bound() > 0.0);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(FbmConfig::default().validate().is_ok());
        assert!(FbmConfig::default().with_gain(0.0).validate().is_err());
        assert!(FbmConfig::default().with_lacunarity(f64::NAN).validate().is_err());
        assert!(
            FbmConfig::default()
                .with_base_amplitude(-1.0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn generator_matches_engine() {
        let engine = Perlin2D::new(&mut RandomSource::with_seed(42)).unwrap();
        let fbm = Fbm2D::new(&engine, FbmConfig::default().with_octaves(6)).unwrap();
        assert_eq!(fbm.config().octaves, 6);
        assert!(std::ptr::eq(fbm.engine(), &engine));
        for &(x, y) in &[(0.3, 0.7), (12.5, 99.1), (-4.2, 250.0)] {
            assert_eq!(fbm.get2(x, y), engine.fbm(x, y, 6));
        }
    }

    #[test]
    fn custom_schedule_is_unclamped() {
        let engine = Perlin2D::new(&mut RandomSource::with_seed(42)).unwrap();
        let cfg = FbmConfig::default().with_base_amplitude(1.0).with_octaves(4);
        let fbm = Fbm2D::new(&engine, cfg).unwrap();
        for i in 0..64 {
            let (x, y) = (i as f64 * 0.77, i as f64 * 0.31);
            let v = fbm.get2(x, y);
            assert!(v.abs() <= cfg.amplitude_bound() + 1e-12);
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let engine = Perlin2D::new(&mut RandomSource::with_seed(1)).unwrap();
        assert!(Fbm2D::new(&engine, FbmConfig::default().with_gain(-0.5)).is_err());
    }

    #[test]
    fn custom_schedule_matches_strict_fbm() {
        let engine = Perlin2D::new(&mut RandomSource::with_seed(42)).unwrap();
        let cfg = FbmConfig::default().with_gain(0.25).with_octaves(5);
        let fbm = Fbm2D::new(&engine, cfg).unwrap();
        let v = fbm.get2(0.3, 0.7);
        assert!(!v.is_nan());
        assert_eq!(v, engine.fbm_with(&cfg, 0.3, 0.7).unwrap());
    }
}
