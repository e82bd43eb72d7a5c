//! Matching between proposers and receivers
//!
//! Stored as two index-aligned partner vectors that always mirror each
//! other: `proposer_partners[p] == Some(r)` iff `receiver_partners[r] == Some(p)`.

use crate::errors::EngineError;
use crate::ids::{ProposerId, ReceiverId, Side};
use serde::{Deserialize, Serialize};

/// A (possibly partial) one-to-one matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matching {
    proposer_partners: Vec<Option<ReceiverId>>,
    receiver_partners: Vec<Option<ProposerId>>,
}

impl Matching {
    /// Matching with nobody paired
    pub fn empty(proposers: usize, receivers: usize) -> Self {
        Self {
            proposer_partners: vec![None; proposers],
            receiver_partners: vec![None; receivers],
        }
    }

    /// Build from explicit pairs over groups of the given sizes.
    ///
    /// Rejects out-of-range ids and any agent appearing in two pairs.
    pub fn from_pairs(
        proposers: usize,
        receivers: usize,
        pairs: impl IntoIterator<Item = (ProposerId, ReceiverId)>,
    ) -> Result<Self, EngineError> {
        let mut matching = Self::empty(proposers, receivers);

        for (p, r) in pairs {
            if p.index() >= proposers || r.index() >= receivers {
                return Err(EngineError::MatchingShape {
                    reason: format!("pair ({}, {}) outside {}x{} instance", p, r, proposers, receivers),
                });
            }
            if let Some(existing) = matching.proposer_partners[p.index()] {
                return Err(EngineError::MatchingShape {
                    reason: format!("{} paired with both {} and {}", p, existing, r),
                });
            }
            if let Some(existing) = matching.receiver_partners[r.index()] {
                return Err(EngineError::MatchingShape {
                    reason: format!("{} paired with both {} and {}", r, existing, p),
                });
            }
            matching.proposer_partners[p.index()] = Some(r);
            matching.receiver_partners[r.index()] = Some(p);
        }

        Ok(matching)
    }

    pub fn proposer_count(&self) -> usize {
        self.proposer_partners.len()
    }

    pub fn receiver_count(&self) -> usize {
        self.receiver_partners.len()
    }

    /// Receiver paired with `proposer`, if any
    pub fn partner_of_proposer(&self, proposer: ProposerId) -> Option<ReceiverId> {
        self.proposer_partners.get(proposer.index()).copied().flatten()
    }

    /// Proposer paired with `receiver`, if any
    pub fn partner_of_receiver(&self, receiver: ReceiverId) -> Option<ProposerId> {
        self.receiver_partners.get(receiver.index()).copied().flatten()
    }

    /// Partner index of agent `index` on `side`, as an index into the other group
    pub fn partner(&self, side: Side, index: usize) -> Option<usize> {
        match side {
            Side::Proposer => self.partner_of_proposer(ProposerId::new(index)).map(|r| r.index()),
            Side::Receiver => self.partner_of_receiver(ReceiverId::new(index)).map(|p| p.index()),
        }
    }

    /// Matched pairs in proposer order
    pub fn pairs(&self) -> impl Iterator<Item = (ProposerId, ReceiverId)> + '_ {
        self.proposer_partners
            .iter()
            .enumerate()
            .filter_map(|(p, r)| r.map(|r| (ProposerId::new(p), r)))
    }

    /// Number of matched pairs
    pub fn len(&self) -> usize {
        self.pairs().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn unmatched_proposers(&self) -> Vec<ProposerId> {
        self.proposer_partners
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_none())
            .map(|(p, _)| ProposerId::new(p))
            .collect()
    }

    pub fn unmatched_receivers(&self) -> Vec<ReceiverId> {
        self.receiver_partners
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_none())
            .map(|(r, _)| ReceiverId::new(r))
            .collect()
    }

    /// True if this is a complete bijection: equal group sizes and every
    /// agent on both sides paired.
    pub fn is_complete(&self) -> bool {
        self.proposer_count() == self.receiver_count()
            && self.proposer_partners.iter().all(Option::is_some)
            && self.receiver_partners.iter().all(Option::is_some)
    }

    /// Check that the two partner vectors mirror each other.
    ///
    /// Always true for matchings built through this type's constructors;
    /// deserialized matchings must pass it before use.
    pub fn is_consistent(&self) -> bool {
        let forward = self.proposer_partners.iter().enumerate().all(|(p, r)| match r {
            Some(r) => self.partner_of_receiver(*r) == Some(ProposerId::new(p)),
            None => true,
        });
        let backward = self.receiver_partners.iter().enumerate().all(|(r, p)| match p {
            Some(p) => self.partner_of_proposer(*p) == Some(ReceiverId::new(r)),
            None => true,
        });
        forward && backward
    }
}
