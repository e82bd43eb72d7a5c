//! Scenario runner
//!
//! A scenario is one preference table pushed through the engine and then
//! through the stability verifier. Tables are either generated from a seed
//! or supplied by the caller.

use std::time::Instant;

use matching_engine::{verify, EngineConfig, MatchingEngine, Solution};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use types::errors::EngineError;
use types::preferences::PreferenceTable;
use types::verdict::Verdict;

/// Configuration for a generated scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Number of proposers, and of receivers
    pub couples: usize,
    /// Seed for preference generation
    pub seed: u64,
    /// Engine settings for the run
    pub engine: EngineConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            couples: 10,
            seed: 42,
            engine: EngineConfig::default(),
        }
    }
}

impl ScenarioConfig {
    /// Same scenario, different seed
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }

    /// Generate this scenario's preference table.
    ///
    /// The same seed always yields the same table.
    pub fn generate(&self) -> PreferenceTable {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        PreferenceTable::generate(self.couples, &mut rng)
    }
}

/// Everything a single run produced
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    /// Generation seed, absent for tables loaded from input
    pub seed: Option<u64>,
    pub preferences: PreferenceTable,
    pub solution: Solution,
    pub verdict: Verdict,
    pub elapsed_ns: u64,
}

impl ScenarioOutcome {
    pub fn is_stable(&self) -> bool {
        self.verdict.stable
    }
}

/// Generate, solve and verify a seeded scenario
pub fn run_generated(config: &ScenarioConfig) -> Result<ScenarioOutcome, EngineError> {
    let preferences = config.generate();
    let mut outcome = run_instance(preferences, config.engine.clone())?;
    outcome.seed = Some(config.seed);
    Ok(outcome)
}

/// Solve and verify a caller-supplied table
pub fn run_instance(
    preferences: PreferenceTable,
    engine: EngineConfig,
) -> Result<ScenarioOutcome, EngineError> {
    let started = Instant::now();
    let solution = MatchingEngine::new(engine).solve(&preferences)?;
    let verdict = verify(&preferences, &solution.matching)?;
    let elapsed_ns = started.elapsed().as_nanos() as u64;

    if verdict.stable {
        info!(
            proposers = preferences.proposer_count(),
            receivers = preferences.receiver_count(),
            proposals = solution.proposals,
            elapsed_ns,
            "Scenario complete"
        );
    } else {
        warn!(proposals = solution.proposals, "Scenario produced an unstable matching");
    }

    Ok(ScenarioOutcome {
        seed: None,
        preferences,
        solution,
        verdict,
        elapsed_ns,
    })
}
