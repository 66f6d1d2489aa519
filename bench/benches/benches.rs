use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use terra::{
    Fbm2D, FbmConfig, PermutationTable, Perlin2D, RandomSource,
    utils::{flatten2, normalize2, sample_grid},
};

const SIZE: usize = 257;
const SEED: u64 = 2025;

fn bench_table_build(c: &mut Criterion) {
    c.bench_function("PermutationTable shuffle", |b| {
        b.iter(|| {
            let mut rng = RandomSource::with_seed(SEED);
            black_box(PermutationTable::shuffled(&mut rng).unwrap())
        })
    });
}

fn bench_noise_single(c: &mut Criterion) {
    let engine = Perlin2D::new(&mut RandomSource::with_seed(SEED)).unwrap();
    c.bench_function("Perlin2D noise_2d", |b| {
        b.iter(|| black_box(engine.noise_2d(black_box(128.3), black_box(64.7))))
    });
}

fn bench_fbm_octaves(c: &mut Criterion) {
    let engine = Perlin2D::new(&mut RandomSource::with_seed(SEED)).unwrap();
    let mut group = c.benchmark_group("Perlin2D fbm");
    for octaves in [1u32, 4, 8] {
        group.bench_function(format!("{} octaves", octaves), |b| {
            b.iter(|| black_box(engine.fbm(black_box(12.5), black_box(99.1), octaves)))
        });
    }
    group.finish();
}

fn bench_fbm_grid(c: &mut Criterion) {
    let engine = Perlin2D::new(&mut RandomSource::with_seed(SEED)).unwrap();
    c.bench_function("Fbm2D 8 octaves grid + normalize + flatten", |b| {
        b.iter(|| {
            let fbm = Fbm2D::new(&engine, FbmConfig::default().with_octaves(8)).unwrap();
            let mut map = sample_grid(&fbm, SIZE, SIZE, 0.05).unwrap();
            normalize2(&mut map);
            black_box(flatten2(&map))
        })
    });
}

criterion_group!(
    noise_benchmarks,
    bench_table_build,
    bench_noise_single,
    bench_fbm_octaves,
    bench_fbm_grid
);
criterion_main!(noise_benchmarks);
