//! Stability verdict types
//!
//! A verdict is either stable, or unstable with the first blocking pair the
//! verifier found. The witness carries every id and rank needed to replay
//! the violation in a test assertion.

use crate::ids::{ProposerId, ReceiverId, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A proposer and receiver who both prefer each other over their partners.
///
/// Partner fields are None only for agents left unmatched, which happens
/// when the groups differ in size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockingPair {
    pub proposer: ProposerId,
    pub receiver: ReceiverId,
    /// Receiver currently paired with `proposer`
    pub proposer_partner: Option<ReceiverId>,
    /// Proposer currently paired with `receiver`
    pub receiver_partner: Option<ProposerId>,
    /// Rank `proposer` gives `receiver`
    pub proposer_rank_of_receiver: usize,
    /// Rank `proposer` gives its own partner
    pub proposer_rank_of_partner: Option<usize>,
    /// Rank `receiver` gives `proposer`
    pub receiver_rank_of_proposer: usize,
    /// Rank `receiver` gives its own partner
    pub receiver_rank_of_partner: Option<usize>,
    /// Which side's scan found the pair
    pub detected_by: Side,
}

fn fmt_partner<T: fmt::Display>(partner: &Option<T>, rank: Option<usize>) -> String {
    match (partner, rank) {
        (Some(partner), Some(rank)) => format!("{} ({})", partner, rank),
        _ => "nobody".to_string(),
    }
}

impl fmt::Display for BlockingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} prefers {} ({}) over {}",
            self.proposer,
            self.receiver,
            self.proposer_rank_of_receiver,
            fmt_partner(&self.proposer_partner, self.proposer_rank_of_partner),
        )?;
        write!(
            f,
            "{} prefers {} ({}) over {}",
            self.receiver,
            self.proposer,
            self.receiver_rank_of_proposer,
            fmt_partner(&self.receiver_partner, self.receiver_rank_of_partner),
        )
    }
}

/// Outcome of a stability check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub stable: bool,
    pub witness: Option<BlockingPair>,
}

impl Verdict {
    pub fn stable() -> Self {
        Self {
            stable: true,
            witness: None,
        }
    }

    pub fn unstable(witness: BlockingPair) -> Self {
        Self {
            stable: false,
            witness: Some(witness),
        }
    }

    pub fn is_stable(&self) -> bool {
        self.stable
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.witness {
            None => write!(f, "Matching is STABLE."),
            Some(pair) => {
                writeln!(f, "Matching is UNSTABLE (found by {} scan).", pair.detected_by)?;
                write!(f, "{}", pair)
            }
        }
    }
}
