//! Proposal execution
//!
//! Applies one proposal to a receiver's record, numbers it, and keeps the
//! event log for the current run.

use tracing::debug;
use types::ids::Side;
use types::preferences::Ranking;

use crate::events::{ProposalEvent, ProposalOutcome};
use crate::records::ReceiverRecord;

/// Proposal executor with per-run sequence generation
pub struct ProposalExecutor {
    proposing: Side,
    sequence_counter: u64,
    record_events: bool,
    events: Vec<ProposalEvent>,
}

impl ProposalExecutor {
    /// Create an executor numbering proposals from `starting_sequence`
    pub fn new(proposing: Side, starting_sequence: u64, record_events: bool) -> Self {
        Self {
            proposing,
            sequence_counter: starting_sequence,
            record_events,
            events: Vec::new(),
        }
    }

    /// Get next sequence number (monotonically increasing)
    fn next_sequence(&mut self) -> u64 {
        let seq = self.sequence_counter;
        self.sequence_counter += 1;
        seq
    }

    /// Proposals executed so far
    pub fn proposals(&self) -> u64 {
        self.sequence_counter
    }

    /// `proposer` offers itself to `receiver`, which it ranks at
    /// `proposer_rank`.
    ///
    /// The receiver accepts if unheld or if it ranks the proposer strictly
    /// better than its current holder. On acceptance the record is updated
    /// and the displaced holder, if any, is reported in the outcome.
    ///
    /// # Panics
    /// Panics if `proposer` is outside `receiver_ranking`. The engine only
    /// passes proposers from a validated table.
    pub fn execute_proposal(
        &mut self,
        proposer: usize,
        proposer_rank: usize,
        receiver: usize,
        receiver_ranking: &Ranking,
        record: &mut ReceiverRecord,
    ) -> ProposalOutcome {
        let receiver_rank = receiver_ranking.rank(proposer);

        let outcome = match record.holder() {
            Some(holder) if !record.would_accept(receiver_rank) => {
                ProposalOutcome::Rejected { holder }
            }
            _ => ProposalOutcome::Accepted {
                displaced: record.hold(proposer, receiver_rank),
            },
        };

        let sequence = self.next_sequence();
        debug!(
            sequence,
            proposer,
            receiver,
            proposer_rank,
            receiver_rank,
            accepted = outcome.is_accepted(),
            "proposal"
        );

        if self.record_events {
            self.events.push(ProposalEvent {
                sequence,
                proposing: self.proposing,
                proposer,
                receiver,
                proposer_rank,
                receiver_rank,
                outcome,
            });
        }

        outcome
    }

    /// Hand over the event log, leaving it empty
    pub fn take_events(&mut self) -> Vec<ProposalEvent> {
        std::mem::take(&mut self.events)
    }
}
