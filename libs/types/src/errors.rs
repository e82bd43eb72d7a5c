//! Error types for the matching workspace
//!
//! Comprehensive error taxonomy using thiserror

use crate::ids::Side;
use thiserror::Error;

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid instance: {0}")]
    Instance(#[from] InstanceError),

    /// A proposing agent ran out of candidates. Only reachable when the
    /// proposing group is larger than the receiving group.
    #[error("Asymmetric groups: {} {side}(s) exhausted their rankings unmatched: {unmatched:?}", .unmatched.len())]
    AsymmetricGroups { side: Side, unmatched: Vec<usize> },

    #[error("Step budget exceeded: more than {budget} proposals")]
    StepBudgetExceeded { budget: usize },

    #[error("Matching does not fit the instance: {reason}")]
    MatchingShape { reason: String },
}

/// A preference ranking that is not a strict total order over the
/// opposite group
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    #[error("{side}[{owner}] ranks candidate {candidate}, outside [0, {bound})")]
    CandidateOutOfRange {
        side: Side,
        owner: usize,
        candidate: usize,
        bound: usize,
    },

    #[error("{side}[{owner}] ranks candidate {candidate} more than once")]
    DuplicateCandidate {
        side: Side,
        owner: usize,
        candidate: usize,
    },

    #[error("{side}[{owner}] never ranks candidate {candidate}")]
    MissingCandidate {
        side: Side,
        owner: usize,
        candidate: usize,
    },

    #[error("No {side} with id {id} (group size {size})")]
    UnknownAgent { side: Side, id: usize, size: usize },
}
