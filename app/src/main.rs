use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use terra::{
    Fbm2D, FbmConfig, Perlin2D, RandomSource, UniformInt,
    utils::{HeightMap2D, normalize2, sample_grid},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const SHADES: &[u8] = b" .:-=+*#%@";

#[derive(Parser, Debug)]
#[command(name = "terra", about = "Seeded 2D Perlin noise and fbm sampler")]
struct Cli {
    /// Explicit seed; omit for an entropy-seeded run
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Single-octave noise at (x, y)
    Sample {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Fractal Brownian motion at (x, y)
    Fbm {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[arg(long, default_value_t = 8)]
        octaves: u32,
    },
    /// Normalized fbm heightmap as CSV rows or ASCII shades
    Grid {
        #[arg(long, default_value_t = 64)]
        width: usize,
        #[arg(long, default_value_t = 32)]
        height: usize,
        #[arg(long, default_value_t = 0.05)]
        scale: f64,
        #[arg(long, default_value_t = 8)]
        octaves: u32,
        #[arg(long)]
        ascii: bool,
    },
    /// Comma-separated integer draws, for histogramming the RNG
    Draws {
        #[arg(long, default_value_t = 10_000)]
        count: usize,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        min: i64,
        #[arg(long, default_value_t = 255, allow_negative_numbers = true)]
        max: i64,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn random_source(seed: Option<u64>) -> RandomSource {
    match seed {
        Some(seed) => RandomSource::with_seed(seed),
        None => RandomSource::new(),
    }
}

fn shade(h: f32) -> char {
    let last = SHADES.len() - 1;
    SHADES[((h * last as f32).round() as usize).min(last)] as char
}

fn print_grid(map: &HeightMap2D, ascii: bool) {
    for row in map {
        if ascii {
            println!("{}", row.iter().map(|&h| shade(h)).collect::<String>());
        } else {
            let cells: Vec<String> = row.iter().map(|h| format!("{:.4}", h)).collect();
            println!("{}", cells.join(","));
        }
    }
}

fn build_engine(rng: &mut RandomSource) -> Result<Perlin2D> {
    Perlin2D::new(rng).context("building noise engine")
}

fn run(cli: Cli) -> Result<()> {
    let mut rng = random_source(cli.seed);
    debug!(seed = ?rng.seed(), "random source ready");

    match cli.command {
        Command::Sample { x, y } => {
            let engine = build_engine(&mut rng)?;
            println!("{}", engine.noise_2d(x, y));
        }
        Command::Fbm { x, y, octaves } => {
            let engine = build_engine(&mut rng)?;
            println!("{}", engine.fbm(x, y, octaves));
        }
        Command::Grid {
            width,
            height,
            scale,
            octaves,
            ascii,
        } => {
            let engine = build_engine(&mut rng)?;
            let fbm = Fbm2D::new(&engine, FbmConfig::default().with_octaves(octaves))?;
            let mut map = sample_grid(&fbm, width, height, scale)
                .with_context(|| format!("sampling {}x{} grid", width, height))?;
            normalize2(&mut map);
            info!(width, height, octaves, "grid sampled");
            print_grid(&map, ascii);
        }
        Command::Draws { count, min, max } => {
            if min > max {
                bail!("--min {} must not exceed --max {}", min, max);
            }
            let draws = (0..count)
                .map(|_| rng.gen_int(min, max).map(|v| v.to_string()))
                .collect::<terra::Result<Vec<_>>>()?;
            println!("{}", draws.join(","));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
