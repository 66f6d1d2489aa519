use terra::{Fbm2D, FbmConfig, Perlin2D, RandomSource, normalize2, sample_grid};

const SHADES: &[u8] = b" .:-=+*#%@";

// Map a height in [0, 1] onto the shade ramp
fn shade(h: f32) -> char {
    let last = SHADES.len() - 1;
    SHADES[((h * last as f32).round() as usize).min(last)] as char
}

fn main() -> terra::Result<()> {
    // Reproducible engine from seed 2025
    let mut rng = RandomSource::with_seed(2025);
    let engine = Perlin2D::new(&mut rng)?;

    // 6-octave fbm sampled every 0.05 units over a 64×32 grid
    let fbm = Fbm2D::new(&engine, FbmConfig::default().with_octaves(6))?;
    let mut map = sample_grid(&fbm, 64, 32, 0.05)?;
    normalize2(&mut map);

    for row in &map {
        let line: String = row.iter().map(|&h| shade(h)).collect();
        println!("{}", line);
    }
    Ok(())
}
