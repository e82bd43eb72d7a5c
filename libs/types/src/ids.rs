//! Agent identifier types
//!
//! Both groups are indexed densely from zero, so an id doubles as an index
//! into any per-group array. The newtypes keep proposer and receiver
//! indices from being mixed up at API boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an agent in the proposing group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposerId(usize);

impl ProposerId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in proposer-indexed arrays
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ProposerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Proposer[{}]", self.0)
    }
}

impl From<usize> for ProposerId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Identifier of an agent in the receiving group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiverId(usize);

impl ReceiverId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in receiver-indexed arrays
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ReceiverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Receiver[{}]", self.0)
    }
}

impl From<usize> for ReceiverId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Which of the two groups an agent belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Proposer,
    Receiver,
}

impl Side {
    /// The opposite group
    pub fn other(&self) -> Side {
        match self {
            Side::Proposer => Side::Receiver,
            Side::Receiver => Side::Proposer,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Proposer => write!(f, "proposer"),
            Side::Receiver => write!(f, "receiver"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_index() {
        assert_eq!(ProposerId::new(4).index(), 4);
        assert_eq!(ReceiverId::from(7).index(), 7);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(ProposerId::new(2).to_string(), "Proposer[2]");
        assert_eq!(ReceiverId::new(0).to_string(), "Receiver[0]");
    }

    #[test]
    fn test_id_serialization() {
        let id = ReceiverId::new(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "3");
        let back: ReceiverId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_side_other() {
        assert_eq!(Side::Proposer.other(), Side::Receiver);
        assert_eq!(Side::Receiver.other(), Side::Proposer);
        assert_eq!(serde_json::to_string(&Side::Receiver).unwrap(), "\"receiver\"");
    }
}
