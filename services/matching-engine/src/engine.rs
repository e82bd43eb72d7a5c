//! Matching engine core
//!
//! Runs deferred acceptance over a preference table: free proposers propose
//! down their rankings, receivers provisionally hold the best offer so far,
//! and the run ends when nobody is free.

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use types::errors::EngineError;
use types::ids::{ProposerId, ReceiverId, Side};
use types::matching::Matching;
use types::preferences::PreferenceTable;

use crate::events::{ProposalEvent, ProposalOutcome};
use crate::matching::{FreeProposers, ProposalExecutor, SelectionOrder};
use crate::records::{ProposerRecord, ReceiverRecord};

/// Configuration for a matching run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Which group proposes. Receivers proposing yields the
    /// receiver-optimal matching.
    pub proposing: Side,
    /// Order in which free proposers are picked
    pub selection: SelectionOrder,
    /// Maximum number of proposals before the run is aborted.
    /// None means proposers × receivers, which no valid run exceeds.
    pub step_budget: Option<usize>,
    /// Keep a per-proposal event log
    pub record_events: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            proposing: Side::Proposer,
            selection: SelectionOrder::LowestIndex,
            step_budget: None,
            record_events: true,
        }
    }
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub matching: Matching,
    pub proposing: Side,
    pub proposals: u64,
    pub events: Vec<ProposalEvent>,
}

/// Main matching engine
pub struct MatchingEngine {
    config: EngineConfig,
    /// Proposals made in the most recent run
    last_proposals: u64,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl MatchingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            last_proposals: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Proposals made by the most recent run, successful or not
    pub fn last_proposals(&self) -> u64 {
        self.last_proposals
    }

    /// Compute a stable matching for `prefs`.
    ///
    /// Every run starts from fresh partner records and a sequence counter
    /// at zero. Fails if a proposer exhausts its ranking unmatched, which
    /// requires the proposing group to be the larger one, or if the step
    /// budget runs out.
    pub fn solve(&mut self, prefs: &PreferenceTable) -> Result<Solution, EngineError> {
        let side = self.config.proposing;
        let proposing = prefs.rankings(side);
        let receiving = prefs.rankings(side.other());
        let budget = self
            .config
            .step_budget
            .unwrap_or(proposing.len() * receiving.len());

        info!(
            proposing = %side,
            proposers = proposing.len(),
            receivers = receiving.len(),
            order = %self.config.selection,
            budget,
            "Starting deferred acceptance"
        );

        let mut proposers = vec![ProposerRecord::new(); proposing.len()];
        let mut receivers = vec![ReceiverRecord::new(); receiving.len()];
        let mut free = FreeProposers::new(self.config.selection, proposing.len());
        let mut executor = ProposalExecutor::new(side, 0, self.config.record_events);
        let mut unmatched = Vec::new();
        self.last_proposals = 0;

        while let Some(proposer) = free.pop() {
            let Some(rank) = proposers[proposer].advance(receiving.len()) else {
                unmatched.push(proposer);
                continue;
            };

            if executor.proposals() >= budget as u64 {
                self.last_proposals = executor.proposals();
                error!(budget, free = free.len() + 1, "Step budget exhausted");
                return Err(EngineError::StepBudgetExceeded { budget });
            }

            let receiver = proposing[proposer].order()[rank];
            let outcome = executor.execute_proposal(
                proposer,
                rank,
                receiver,
                &receiving[receiver],
                &mut receivers[receiver],
            );

            match outcome {
                ProposalOutcome::Accepted { displaced } => {
                    proposers[proposer].engage(receiver);
                    if let Some(previous) = displaced {
                        proposers[previous].release();
                        free.push(previous);
                    }
                }
                ProposalOutcome::Rejected { .. } => free.push(proposer),
            }
        }

        self.last_proposals = executor.proposals();

        if !unmatched.is_empty() {
            unmatched.sort_unstable();
            error!(
                proposing = %side,
                unmatched = unmatched.len(),
                "Proposers exhausted their rankings"
            );
            return Err(EngineError::AsymmetricGroups { side, unmatched });
        }

        let matching = Self::collect_matching(prefs, side, &proposers)?;
        info!(
            proposals = self.last_proposals,
            pairs = matching.len(),
            "Deferred acceptance complete"
        );

        Ok(Solution {
            matching,
            proposing: side,
            proposals: self.last_proposals,
            events: executor.take_events(),
        })
    }

    /// Translate proposing-side records into proposer/receiver pairs
    fn collect_matching(
        prefs: &PreferenceTable,
        side: Side,
        proposers: &[ProposerRecord],
    ) -> Result<Matching, EngineError> {
        let pairs = proposers.iter().enumerate().filter_map(|(agent, record)| {
            record.partner().map(|partner| match side {
                Side::Proposer => (ProposerId::new(agent), ReceiverId::new(partner)),
                Side::Receiver => (ProposerId::new(partner), ReceiverId::new(agent)),
            })
        });
        Matching::from_pairs(prefs.proposer_count(), prefs.receiver_count(), pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(p: usize, r: usize) -> (ProposerId, ReceiverId) {
        (ProposerId::new(p), ReceiverId::new(r))
    }

    fn three_couples() -> PreferenceTable {
        PreferenceTable::from_rankings(
            vec![vec![1, 0, 2], vec![0, 1, 2], vec![0, 1, 2]],
            vec![vec![0, 1, 2], vec![1, 0, 2], vec![0, 1, 2]],
        )
        .unwrap()
    }

    #[test]
    fn test_engine_three_couples() {
        let mut engine = MatchingEngine::default();
        let solution = engine.solve(&three_couples()).unwrap();

        assert_eq!(
            solution.matching.pairs().collect::<Vec<_>>(),
            vec![pair(0, 1), pair(1, 0), pair(2, 2)]
        );
        assert!(solution.matching.is_complete());
        // 0→1, 1→0, 2→0 (rejected), 2→1 (rejected), 2→2
        assert_eq!(solution.proposals, 5);
        assert_eq!(solution.events.len(), 5);
    }

    #[test]
    fn test_engine_empty_instance() {
        let prefs = PreferenceTable::from_rankings(vec![], vec![]).unwrap();
        let solution = MatchingEngine::default().solve(&prefs).unwrap();
        assert!(solution.matching.is_empty());
        assert!(solution.matching.is_complete());
        assert_eq!(solution.proposals, 0);
    }

    #[test]
    fn test_engine_displacement() {
        // Both proposers want receiver 0, which prefers proposer 1
        let prefs = PreferenceTable::from_rankings(
            vec![vec![0, 1], vec![0, 1]],
            vec![vec![1, 0], vec![0, 1]],
        )
        .unwrap();
        let solution = MatchingEngine::default().solve(&prefs).unwrap();

        assert_eq!(
            solution.matching.pairs().collect::<Vec<_>>(),
            vec![pair(0, 1), pair(1, 0)]
        );
        assert_eq!(
            solution.events[1].outcome,
            ProposalOutcome::Accepted { displaced: Some(0) }
        );
    }

    #[test]
    fn test_engine_receivers_propose() {
        let config = EngineConfig {
            proposing: Side::Receiver,
            ..EngineConfig::default()
        };
        let solution = MatchingEngine::new(config).solve(&three_couples()).unwrap();

        // Receivers 0 and 1 each get their first choice
        assert_eq!(
            solution.matching.pairs().collect::<Vec<_>>(),
            vec![pair(0, 0), pair(1, 1), pair(2, 2)]
        );
        assert_eq!(solution.proposing, Side::Receiver);
        assert!(solution.events.iter().all(|e| e.proposing == Side::Receiver));
    }

    #[test]
    fn test_engine_more_proposers_than_receivers() {
        let prefs = PreferenceTable::from_rankings(
            vec![vec![0, 1], vec![0, 1], vec![1, 0]],
            vec![vec![0, 1, 2], vec![0, 1, 2]],
        )
        .unwrap();
        let err = MatchingEngine::default().solve(&prefs).unwrap_err();
        assert_eq!(
            err,
            EngineError::AsymmetricGroups { side: Side::Proposer, unmatched: vec![2] }
        );
    }

    #[test]
    fn test_engine_fewer_proposers_than_receivers() {
        let prefs = PreferenceTable::from_rankings(
            vec![vec![2, 0, 1], vec![2, 1, 0]],
            vec![vec![0, 1], vec![1, 0], vec![1, 0]],
        )
        .unwrap();
        let solution = MatchingEngine::default().solve(&prefs).unwrap();

        assert_eq!(
            solution.matching.pairs().collect::<Vec<_>>(),
            vec![pair(0, 0), pair(1, 2)]
        );
        assert_eq!(solution.matching.unmatched_receivers(), vec![ReceiverId::new(1)]);
        assert!(!solution.matching.is_complete());
    }

    #[test]
    fn test_engine_step_budget() {
        let config = EngineConfig {
            step_budget: Some(3),
            ..EngineConfig::default()
        };
        let mut engine = MatchingEngine::new(config);
        let err = engine.solve(&three_couples()).unwrap_err();

        assert_eq!(err, EngineError::StepBudgetExceeded { budget: 3 });
        assert_eq!(engine.last_proposals(), 3);
    }

    #[test]
    fn test_engine_sequence_resets_between_runs() {
        let mut engine = MatchingEngine::default();
        let first = engine.solve(&three_couples()).unwrap();
        let second = engine.solve(&three_couples()).unwrap();

        assert_eq!(first.events[0].sequence, 0);
        assert_eq!(second.events[0].sequence, 0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_engine_without_event_log() {
        let config = EngineConfig {
            record_events: false,
            ..EngineConfig::default()
        };
        let solution = MatchingEngine::new(config).solve(&three_couples()).unwrap();
        assert!(solution.events.is_empty());
        assert_eq!(solution.proposals, 5);
    }
}
