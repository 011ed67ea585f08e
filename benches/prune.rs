use std::hint::black_box;
use criterion::{criterion_group, criterion_main, Criterion};
use eegraph::config::Algorithm;
use eegraph::{mvar, prune_to_density, spectral, Measure};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_adjacency(n: usize) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(42);
    Array2::from_shape_fn((n, n), |(i, j)| if i == j { 0.0 } else { rng.gen::<f64>() })
}

fn random_signal(n_ch: usize, n_t: usize) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(7);
    Array2::from_shape_fn((n_ch, n_t), |_| rng.gen_range(-1.0..1.0))
}

fn bench_prune_64(c: &mut Criterion) {
    let m = random_adjacency(64);
    c.bench_function("prune_to_density 64×64 → 0.2", |b| {
        b.iter(|| {
            let out = prune_to_density(black_box(&m), black_box(0.2)).unwrap();
            black_box(out.removed)
        })
    });
}

fn bench_fit_yw(c: &mut Criterion) {
    let x = random_signal(16, 9760);
    c.bench_function("mvar::fit yw [16×9760] p=5", |b| {
        b.iter(|| {
            let model = mvar::fit(black_box(x.view()), 5, Algorithm::YuleWalker).unwrap();
            black_box(model.noise_cov[[0, 0]])
        })
    });
}

fn bench_pdc(c: &mut Criterion) {
    let x = random_signal(16, 9760);
    let model = mvar::fit(x.view(), 5, Algorithm::YuleWalker).unwrap();
    c.bench_function("pdc 16 ch, 100 bins", |b| {
        b.iter(|| {
            let cube = spectral::connectivity(black_box(&model), Measure::Pdc, 160.0, 100).unwrap();
            black_box(cube[[10, 0, 1]])
        })
    });
}

criterion_group!(benches, bench_prune_64, bench_fit_yw, bench_pdc);
criterion_main!(benches);
