//! Criterion benchmarks for instance generation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use ird_bench::{reference_profile, stress_profile};
use ird_gen::{generate_random, generate_random_connected, DisjointSets};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_generate_random_16(c: &mut Criterion) {
    let config = reference_profile().with_pr_reward(0.1);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("generate_random_16x16", |b| {
        b.iter(|| {
            let mdp = generate_random(&config, &mut rng).unwrap();
            black_box(&mdp);
        });
    });
}

fn bench_generate_connected_16(c: &mut Criterion) {
    let config = reference_profile();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("generate_connected_16x16", |b| {
        b.iter(|| {
            let mdp = generate_random_connected(&config, &mut rng).unwrap();
            black_box(&mdp);
        });
    });
}

fn bench_generate_connected_48(c: &mut Criterion) {
    let config = stress_profile();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("generate_connected_48x48", |b| {
        b.iter(|| {
            let mdp = generate_random_connected(&config, &mut rng).unwrap();
            black_box(&mdp);
        });
    });
}

fn bench_disjoint_chain_10k(c: &mut Criterion) {
    c.bench_function("disjoint_chain_10k", |b| {
        b.iter(|| {
            let mut sets = DisjointSets::new();
            for i in 0..10_000u32 {
                sets.add_singleton(i);
                if i > 0 {
                    sets.union(&(i - 1), &i);
                }
            }
            black_box(sets.is_connected());
        });
    });
}

criterion_group!(
    benches,
    bench_generate_random_16,
    bench_generate_connected_16,
    bench_generate_connected_48,
    bench_disjoint_chain_10k
);
criterion_main!(benches);
