//! Preference rankings for both groups
//!
//! Every agent holds a strict total ranking of the opposite group. Rankings
//! are validated once at construction and are immutable afterwards, so
//! everything downstream may assume a well-formed instance.

use crate::errors::InstanceError;
use crate::ids::{ProposerId, ReceiverId, Side};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One agent's strict ranking of the opposite group.
///
/// Stores both directions: `order[rank] = candidate` and
/// `ranks[candidate] = rank`, so rank queries are O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    order: Vec<usize>,
    ranks: Vec<usize>,
}

impl Ranking {
    /// Validate `order` as a permutation of `[0, bound)`.
    ///
    /// `side` and `owner` identify the ranking's holder in error reports.
    pub fn new(
        side: Side,
        owner: usize,
        order: Vec<usize>,
        bound: usize,
    ) -> Result<Self, InstanceError> {
        const UNSEEN: usize = usize::MAX;
        let mut ranks = vec![UNSEEN; bound];

        for (rank, &candidate) in order.iter().enumerate() {
            if candidate >= bound {
                return Err(InstanceError::CandidateOutOfRange {
                    side,
                    owner,
                    candidate,
                    bound,
                });
            }
            if ranks[candidate] != UNSEEN {
                return Err(InstanceError::DuplicateCandidate {
                    side,
                    owner,
                    candidate,
                });
            }
            ranks[candidate] = rank;
        }

        // All entries are in range and distinct, so a short list is the only
        // way left to miss a candidate.
        if let Some(candidate) = ranks.iter().position(|&r| r == UNSEEN) {
            return Err(InstanceError::MissingCandidate {
                side,
                owner,
                candidate,
            });
        }

        Ok(Self { order, ranks })
    }

    /// Position of `candidate` in this ranking, 0 being most preferred.
    ///
    /// Returns None if `candidate` is outside the ranked group.
    pub fn rank_of(&self, candidate: usize) -> Option<usize> {
        self.ranks.get(candidate).copied()
    }

    /// Unchecked form of [`Ranking::rank_of`].
    ///
    /// # Panics
    /// Panics if `candidate` is outside the ranked group.
    pub fn rank(&self, candidate: usize) -> usize {
        self.ranks[candidate]
    }

    /// Candidate held at `rank`, if the ranking is that long
    pub fn candidate_at(&self, rank: usize) -> Option<usize> {
        self.order.get(rank).copied()
    }

    /// Candidates from most to least preferred
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Rankings of every proposer and every receiver.
///
/// Proposer rankings permute `[0, receivers)` and receiver rankings permute
/// `[0, proposers)`. The classical instance has both groups the same size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPreferences", into = "RawPreferences")]
pub struct PreferenceTable {
    proposers: Vec<Ranking>,
    receivers: Vec<Ranking>,
}

/// Wire form of a preference table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPreferences {
    pub proposers: Vec<Vec<usize>>,
    pub receivers: Vec<Vec<usize>>,
}

impl TryFrom<RawPreferences> for PreferenceTable {
    type Error = InstanceError;

    fn try_from(raw: RawPreferences) -> Result<Self, Self::Error> {
        PreferenceTable::from_rankings(raw.proposers, raw.receivers)
    }
}

impl From<PreferenceTable> for RawPreferences {
    fn from(table: PreferenceTable) -> Self {
        RawPreferences {
            proposers: table.proposers.into_iter().map(|r| r.order).collect(),
            receivers: table.receivers.into_iter().map(|r| r.order).collect(),
        }
    }
}

impl PreferenceTable {
    /// Generate uniformly random rankings for `couples` proposers and
    /// `couples` receivers.
    pub fn generate<R: Rng + ?Sized>(couples: usize, rng: &mut R) -> Self {
        Self::generate_with_sizes(couples, couples, rng)
    }

    /// Generate uniformly random rankings for groups of possibly unequal size.
    ///
    /// Each agent's ranking is an independent shuffle, so every ranking is a
    /// valid permutation by construction.
    pub fn generate_with_sizes<R: Rng + ?Sized>(
        proposers: usize,
        receivers: usize,
        rng: &mut R,
    ) -> Self {
        Self {
            proposers: shuffled_rankings(proposers, receivers, rng),
            receivers: shuffled_rankings(receivers, proposers, rng),
        }
    }

    /// Build from explicit rankings, validating each one.
    ///
    /// Fails on the first ranking that is not a permutation of the
    /// opposite group.
    pub fn from_rankings(
        proposer_rankings: Vec<Vec<usize>>,
        receiver_rankings: Vec<Vec<usize>>,
    ) -> Result<Self, InstanceError> {
        let proposer_count = proposer_rankings.len();
        let receiver_count = receiver_rankings.len();

        let proposers = proposer_rankings
            .into_iter()
            .enumerate()
            .map(|(owner, order)| Ranking::new(Side::Proposer, owner, order, receiver_count))
            .collect::<Result<Vec<_>, _>>()?;
        let receivers = receiver_rankings
            .into_iter()
            .enumerate()
            .map(|(owner, order)| Ranking::new(Side::Receiver, owner, order, proposer_count))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { proposers, receivers })
    }

    pub fn proposer_count(&self) -> usize {
        self.proposers.len()
    }

    pub fn receiver_count(&self) -> usize {
        self.receivers.len()
    }

    /// Number of agents on `side`
    pub fn group_size(&self, side: Side) -> usize {
        self.rankings(side).len()
    }

    /// True when both groups have the same size
    pub fn is_balanced(&self) -> bool {
        self.proposers.len() == self.receivers.len()
    }

    /// All rankings held by agents on `side`, indexed by agent id
    pub fn rankings(&self, side: Side) -> &[Ranking] {
        match side {
            Side::Proposer => &self.proposers,
            Side::Receiver => &self.receivers,
        }
    }

    /// Position of `candidate` in the ranking of agent `owner` on `side`.
    pub fn rank_of(&self, side: Side, owner: usize, candidate: usize) -> Result<usize, InstanceError> {
        let rankings = self.rankings(side);
        let ranking = rankings.get(owner).ok_or(InstanceError::UnknownAgent {
            side,
            id: owner,
            size: rankings.len(),
        })?;
        ranking.rank_of(candidate).ok_or(InstanceError::UnknownAgent {
            side: side.other(),
            id: candidate,
            size: ranking.len(),
        })
    }

    /// Rank `proposer` gives `receiver`
    pub fn proposer_rank(&self, proposer: ProposerId, receiver: ReceiverId) -> Result<usize, InstanceError> {
        self.rank_of(Side::Proposer, proposer.index(), receiver.index())
    }

    /// Rank `receiver` gives `proposer`
    pub fn receiver_rank(&self, receiver: ReceiverId, proposer: ProposerId) -> Result<usize, InstanceError> {
        self.rank_of(Side::Receiver, receiver.index(), proposer.index())
    }
}

fn shuffled_rankings<R: Rng + ?Sized>(owners: usize, candidates: usize, rng: &mut R) -> Vec<Ranking> {
    let mut choices: Vec<usize> = (0..candidates).collect();
    (0..owners)
        .map(|_| {
            choices.shuffle(rng);
            let order = choices.clone();
            let mut ranks = vec![0; candidates];
            for (rank, &candidate) in order.iter().enumerate() {
                ranks[candidate] = rank;
            }
            Ranking { order, ranks }
        })
        .collect()
}

impl fmt::Display for PreferenceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Preferences for proposers")?;
        for (i, ranking) in self.proposers.iter().enumerate() {
            write!(f, "{}:", ProposerId::new(i))?;
            for candidate in ranking.order() {
                write!(f, " {}", candidate)?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(f, "Preferences for receivers")?;
        for (i, ranking) in self.receivers.iter().enumerate() {
            write!(f, "{}:", ReceiverId::new(i))?;
            for candidate in ranking.order() {
                write!(f, " {}", candidate)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
