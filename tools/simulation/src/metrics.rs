//! Batch metrics
//!
//! Aggregates over many seeded scenarios: proposal counts, partner ranks on
//! both sides, stability and run time.

use serde::{Deserialize, Serialize};
use tracing::info;
use types::errors::EngineError;

use crate::scenario::{run_generated, ScenarioConfig, ScenarioOutcome};

/// Aggregated metrics over a batch of trials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchMetrics {
    pub trials: u64,
    pub stable_trials: u64,
    pub total_proposals: u64,
    pub max_proposals: u64,
    pub total_pairs: u64,
    /// Sum over matched pairs of the rank each proposer gives its partner
    pub proposer_rank_sum: u64,
    /// Sum over matched pairs of the rank each receiver gives its partner
    pub receiver_rank_sum: u64,
    pub elapsed_ns: u64,
}

impl BatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished scenario
    pub fn record(&mut self, outcome: &ScenarioOutcome) {
        self.trials += 1;
        if outcome.is_stable() {
            self.stable_trials += 1;
        }
        self.total_proposals += outcome.solution.proposals;
        self.max_proposals = self.max_proposals.max(outcome.solution.proposals);
        self.elapsed_ns += outcome.elapsed_ns;

        let prefs = &outcome.preferences;
        for (proposer, receiver) in outcome.solution.matching.pairs() {
            if let (Ok(pr), Ok(rr)) = (
                prefs.proposer_rank(proposer, receiver),
                prefs.receiver_rank(receiver, proposer),
            ) {
                self.total_pairs += 1;
                self.proposer_rank_sum += pr as u64;
                self.receiver_rank_sum += rr as u64;
            }
        }
    }

    pub fn all_stable(&self) -> bool {
        self.stable_trials == self.trials
    }

    pub fn avg_proposals(&self) -> f64 {
        ratio(self.total_proposals, self.trials)
    }

    /// Mean rank proposers give their partners, 0 = first choice
    pub fn avg_proposer_rank(&self) -> f64 {
        ratio(self.proposer_rank_sum, self.total_pairs)
    }

    /// Mean rank receivers give their partners, 0 = first choice
    pub fn avg_receiver_rank(&self) -> f64 {
        ratio(self.receiver_rank_sum, self.total_pairs)
    }

    pub fn summary(&self) -> String {
        format!(
            "Trials: {} | Stable: {} | Proposals: avg {:.2}, max {} | Proposer rank: {:.3} | Receiver rank: {:.3} | Elapsed: {} ns",
            self.trials,
            self.stable_trials,
            self.avg_proposals(),
            self.max_proposals,
            self.avg_proposer_rank(),
            self.avg_receiver_rank(),
            self.elapsed_ns,
        )
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        return 0.0;
    }
    num as f64 / den as f64
}

/// Run `trials` scenarios with seeds `base.seed`, `base.seed + 1`, ...
pub fn run_trials(base: &ScenarioConfig, trials: u64) -> Result<BatchMetrics, EngineError> {
    let mut metrics = BatchMetrics::new();
    for trial in 0..trials {
        let outcome = run_generated(&base.with_seed(base.seed.wrapping_add(trial)))?;
        metrics.record(&outcome);
    }

    info!(
        trials,
        couples = base.couples,
        stable = metrics.stable_trials,
        avg_proposals = metrics.avg_proposals(),
        "Batch complete"
    );
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::run_instance;
    use matching_engine::EngineConfig;
    use types::ids::Side;
    use types::preferences::PreferenceTable;

    #[test]
    fn test_metrics_creation() {
        let metrics = BatchMetrics::new();
        assert_eq!(metrics.trials, 0);
        assert_eq!(metrics.avg_proposals(), 0.0);
        assert!(metrics.all_stable());
    }

    #[test]
    fn test_record_three_couples() {
        let prefs = PreferenceTable::from_rankings(
            vec![vec![1, 0, 2], vec![0, 1, 2], vec![0, 1, 2]],
            vec![vec![0, 1, 2], vec![1, 0, 2], vec![0, 1, 2]],
        )
        .unwrap();
        let outcome = run_instance(prefs, EngineConfig::default()).unwrap();

        let mut metrics = BatchMetrics::new();
        metrics.record(&outcome);

        assert_eq!(metrics.trials, 1);
        assert_eq!(metrics.stable_trials, 1);
        assert_eq!(metrics.total_proposals, 5);
        assert_eq!(metrics.max_proposals, 5);
        assert_eq!(metrics.total_pairs, 3);
        assert_eq!(metrics.proposer_rank_sum, 2);
        assert_eq!(metrics.receiver_rank_sum, 4);
    }

    #[test]
    fn test_record_agrees_with_report() {
        let prefs = PreferenceTable::from_rankings(
            vec![vec![2, 0, 1], vec![2, 1, 0]],
            vec![vec![0, 1], vec![1, 0], vec![1, 0]],
        )
        .unwrap();
        let outcome = run_instance(prefs, EngineConfig::default()).unwrap();
        let report = crate::report::MatchingReport::from_outcome(&outcome);

        let mut metrics = BatchMetrics::new();
        metrics.record(&outcome);

        // Receiver 1 stays unmatched and contributes nothing
        assert_eq!(metrics.total_pairs, 2);
        assert_eq!(Some(metrics.avg_proposer_rank()), report.mean_proposer_rank());
        assert_eq!(Some(metrics.avg_receiver_rank()), report.mean_receiver_rank());
    }

    #[test]
    fn test_run_trials() {
        let base = ScenarioConfig {
            couples: 12,
            ..ScenarioConfig::default()
        };
        let metrics = run_trials(&base, 25).unwrap();

        assert_eq!(metrics.trials, 25);
        assert!(metrics.all_stable());
        assert_eq!(metrics.total_pairs, 25 * 12);
        assert!(metrics.max_proposals <= 144);
        assert!(metrics.summary().starts_with("Trials: 25 | Stable: 25"));
    }

    #[test]
    fn test_proposing_side_does_better() {
        let proposers = run_trials(&ScenarioConfig { couples: 30, ..ScenarioConfig::default() }, 20).unwrap();
        let receivers = run_trials(
            &ScenarioConfig {
                couples: 30,
                engine: EngineConfig {
                    proposing: Side::Receiver,
                    ..EngineConfig::default()
                },
                ..ScenarioConfig::default()
            },
            20,
        )
        .unwrap();

        // Same tables, so each side's partners are never worse when it proposes
        assert!(proposers.avg_proposer_rank() <= receivers.avg_proposer_rank());
        assert!(receivers.avg_receiver_rank() <= proposers.avg_receiver_rank());
    }
}
