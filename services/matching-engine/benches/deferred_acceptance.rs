//! Deferred acceptance and verification throughput
//!
//! Run with: cargo bench -p matching-engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matching_engine::{verify, EngineConfig, MatchingEngine, SelectionOrder};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use types::preferences::PreferenceTable;

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    for couples in [16usize, 128, 512] {
        let prefs = PreferenceTable::generate(couples, &mut ChaCha8Rng::seed_from_u64(42));
        for order in [SelectionOrder::LowestIndex, SelectionOrder::Fifo] {
            let config = EngineConfig {
                selection: order,
                record_events: false,
                ..EngineConfig::default()
            };
            group.bench_with_input(
                BenchmarkId::new(order.to_string(), couples),
                &prefs,
                |b, prefs| {
                    let mut engine = MatchingEngine::new(config.clone());
                    b.iter(|| engine.solve(black_box(prefs)).unwrap())
                },
            );
        }
    }
    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");
    for couples in [16usize, 128, 512] {
        let prefs = PreferenceTable::generate(couples, &mut ChaCha8Rng::seed_from_u64(7));
        let matching = MatchingEngine::default().solve(&prefs).unwrap().matching;
        group.bench_with_input(BenchmarkId::from_parameter(couples), &couples, |b, _| {
            b.iter(|| verify(black_box(&prefs), black_box(&matching)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_solve, bench_verify);
criterion_main!(benches);
