//! Event structures for the matching engine
//!
//! One event per proposal, in the order proposals were made.

use serde::{Deserialize, Serialize};
use types::ids::Side;

/// A single proposal and how the receiving agent answered it.
///
/// `proposer` and `receiver` are indices into the proposing and receiving
/// groups of the run; when receivers propose, `proposer` is a receiver id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalEvent {
    pub sequence: u64,
    pub proposing: Side,
    pub proposer: usize,
    pub receiver: usize,
    /// Rank the proposer gives the receiver
    pub proposer_rank: usize,
    /// Rank the receiver gives the proposer
    pub receiver_rank: usize,
    pub outcome: ProposalOutcome,
}

/// Receiver's answer to a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum ProposalOutcome {
    /// Receiver now holds the proposer, freeing `displaced` if it held one
    Accepted { displaced: Option<usize> },
    /// Receiver kept `holder`
    Rejected { holder: usize },
}

impl ProposalOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ProposalOutcome::Accepted { .. })
    }
}
