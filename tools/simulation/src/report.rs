//! Matching report
//!
//! Text rendering of a run: both preference tables, one solution line per
//! proposer with the ranks each side gives its partner, and the verdict.

use serde::{Deserialize, Serialize};
use std::fmt;
use types::ids::{ProposerId, ReceiverId, Side};
use types::preferences::PreferenceTable;
use types::verdict::Verdict;

use crate::scenario::ScenarioOutcome;

/// One proposer's line in the solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairLine {
    pub proposer: ProposerId,
    pub receiver: Option<ReceiverId>,
    /// Rank the proposer gives its partner
    pub proposer_rank: Option<usize>,
    /// Rank the partner gives the proposer
    pub receiver_rank: Option<usize>,
}

impl fmt::Display for PairLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.receiver, self.proposer_rank, self.receiver_rank) {
            (Some(receiver), Some(pr), Some(rr)) => write!(
                f,
                "{} + {}  [proposer-rank: {}, receiver-rank: {}]",
                self.proposer, receiver, pr, rr
            ),
            _ => write!(f, "{} + NONE", self.proposer),
        }
    }
}

/// Full report for a single run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingReport {
    pub seed: Option<u64>,
    pub preferences: PreferenceTable,
    pub proposing: Side,
    pub proposals: u64,
    pub pairs: Vec<PairLine>,
    pub verdict: Verdict,
}

impl MatchingReport {
    pub fn from_outcome(outcome: &ScenarioOutcome) -> Self {
        let prefs = &outcome.preferences;
        let matching = &outcome.solution.matching;

        let pairs = (0..prefs.proposer_count())
            .map(ProposerId::new)
            .map(|proposer| {
                let receiver = matching.partner_of_proposer(proposer);
                PairLine {
                    proposer,
                    receiver,
                    proposer_rank: receiver.and_then(|r| prefs.proposer_rank(proposer, r).ok()),
                    receiver_rank: receiver.and_then(|r| prefs.receiver_rank(r, proposer).ok()),
                }
            })
            .collect();

        Self {
            seed: outcome.seed,
            preferences: prefs.clone(),
            proposing: outcome.solution.proposing,
            proposals: outcome.solution.proposals,
            pairs,
            verdict: outcome.verdict.clone(),
        }
    }

    /// Mean rank proposers give their partners; None if nobody is matched
    pub fn mean_proposer_rank(&self) -> Option<f64> {
        mean(self.pairs.iter().filter_map(|p| p.proposer_rank))
    }

    /// Mean rank receivers give their partners; None if nobody is matched
    pub fn mean_receiver_rank(&self) -> Option<f64> {
        mean(self.pairs.iter().filter_map(|p| p.receiver_rank))
    }
}

fn mean(ranks: impl Iterator<Item = usize>) -> Option<f64> {
    let (sum, count) = ranks.fold((0usize, 0usize), |(s, c), r| (s + r, c + 1));
    (count > 0).then(|| sum as f64 / count as f64)
}

impl fmt::Display for MatchingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.preferences)?;
        writeln!(f, "SOLUTION")?;
        for line in &self.pairs {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.verdict)
    }
}
