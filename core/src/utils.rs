use crate::NoiseGenerator;
use crate::error::{NoiseError, Result};

// 2D height map: row‐major Vec<Vec<f32>>, access as `map[y][x]`
pub type HeightMap2D = Vec<Vec<f32>>;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    fn scaled(self, s: f64) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }

    fn plus(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

// Linear interpolation
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

// Quintic fade 6t^5 − 15t^4 + 10t^3
// First and second derivatives vanish at t=0 and t=1
#[inline]
pub fn ease(t: f64) -> f64 {
    t * t * t * (t * (6.0 * t - 15.0) + 10.0)
}

// How far val has travelled from min to max, clamped to [0, 1]
pub fn progress(min: f64, max: f64, val: f64) -> f64 {
    if val <= min {
        return 0.0;
    }
    if val >= max {
        return 1.0;
    }
    (val - min) / (max - min)
}

pub fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f64) -> Vec2 {
    let s = 1.0 - t;
    p0.scaled(s * s * s)
        .plus(p1.scaled(3.0 * s * s * t))
        .plus(p2.scaled(3.0 * s * t * t))
        .plus(p3.scaled(t * t * t))
}

// Sample a generator on a width×height pixel grid at (x * scale, y * scale)
pub fn sample_grid(
    generator: &dyn NoiseGenerator,
    width: usize,
    height: usize,
    scale: f64,
) -> Result<HeightMap2D> {
    if width == 0 || height == 0 {
        return Err(NoiseError::InvalidConfig(format!(
            "grid must be non-empty, got {}x{}",
            width, height
        )));
    }
    if !scale.is_finite() {
        return Err(NoiseError::InvalidConfig(format!("scale {} is not finite", scale)));
    }
    Ok((0..height)
        .map(|y| {
            (0..width)
                .map(|x| generator.get2(x as f64 * scale, y as f64 * scale) as f32)
                .collect()
        })
        .collect())
}

// flatten a 2D height map (row‐major) into a single Vec<f32>
pub fn flatten2(map: &HeightMap2D) -> Vec<f32> {
    map.iter().flat_map(|row| row.iter().cloned()).collect()
}

// Rescale a height map to [0, 1] by its own min and max
pub fn normalize2(map: &mut HeightMap2D) {
    let mut min = f32::MAX;
    let mut max = f32::MIN;

    for row in map.iter() {
        for &val in row.iter() {
            min = min.min(val);
            max = max.max(val);
        }
    }

    let range = (max - min).max(f32::EPSILON); // flat maps end up all zero
    for row in map.iter_mut() {
        for val in row.iter_mut() {
            *val = (*val - min) / range;
        }
    }
}
