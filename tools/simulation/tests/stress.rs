//! Stress test: large instances
//!
//! Solves large seeded instances, asserts a complete stable matching within
//! the proposal bound, and reports throughput.

use matching_engine::{verify, EngineConfig, MatchingEngine};
use simulation::metrics::run_trials;
use simulation::scenario::ScenarioConfig;
use std::time::Instant;

#[test]
#[ignore] // Run with: cargo test --test stress -- --ignored
fn test_2000_couples() {
    let config = ScenarioConfig {
        couples: 2000,
        seed: 2024,
        engine: EngineConfig {
            record_events: false,
            ..EngineConfig::default()
        },
    };
    let prefs = config.generate();

    let start = Instant::now();
    let solution = MatchingEngine::new(config.engine.clone()).solve(&prefs).unwrap();
    let elapsed = start.elapsed();

    assert!(solution.matching.is_complete());
    assert!(solution.proposals <= 2000 * 2000);
    assert!(verify(&prefs, &solution.matching).unwrap().stable);

    println!(
        "2000 couples: {} proposals in {:?} ({:.0} proposals/s)",
        solution.proposals,
        elapsed,
        solution.proposals as f64 / elapsed.as_secs_f64()
    );
}

#[test]
fn test_many_small_trials() {
    let config = ScenarioConfig {
        couples: 6,
        seed: 1,
        ..ScenarioConfig::default()
    };
    let metrics = run_trials(&config, 500).unwrap();

    assert_eq!(metrics.trials, 500);
    assert!(metrics.all_stable());
    assert!(metrics.max_proposals <= 36);
}
