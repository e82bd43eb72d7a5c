//! Blocking-pair search
//!
//! For agent A holding partner P, every candidate C that A ranks above P is
//! a potential blocking partner: if C also ranks A above its own partner,
//! (A, C) blocks the matching.

use tracing::{debug, warn};
use types::errors::EngineError;
use types::ids::{ProposerId, ReceiverId, Side};
use types::matching::Matching;
use types::preferences::PreferenceTable;
use types::verdict::{BlockingPair, Verdict};

/// Stability checks over a finished matching. Read-only.
pub struct StabilityVerifier;

impl StabilityVerifier {
    /// Check both sides, alternating proposer `i` and receiver `i`.
    ///
    /// Either side alone suffices for a deferred-acceptance result; running
    /// both cross-checks the engine. Stops at the first blocking pair.
    pub fn verify(prefs: &PreferenceTable, matching: &Matching) -> Result<Verdict, EngineError> {
        Self::check_shape(prefs, matching)?;

        let proposers = prefs.proposer_count();
        let receivers = prefs.receiver_count();

        for i in 0..proposers.max(receivers) {
            for side in [Side::Proposer, Side::Receiver] {
                if i >= prefs.group_size(side) {
                    continue;
                }
                if let Some(pair) = Self::scan_agent(prefs, matching, side, i) {
                    return Ok(Self::refuted(pair));
                }
            }
        }

        debug!(proposers, receivers, "Matching verified stable");
        Ok(Verdict::stable())
    }

    /// Check from one side only
    pub fn verify_side(
        prefs: &PreferenceTable,
        matching: &Matching,
        side: Side,
    ) -> Result<Verdict, EngineError> {
        Self::check_shape(prefs, matching)?;

        for agent in 0..prefs.group_size(side) {
            if let Some(pair) = Self::scan_agent(prefs, matching, side, agent) {
                return Ok(Self::refuted(pair));
            }
        }
        Ok(Verdict::stable())
    }

    fn refuted(pair: BlockingPair) -> Verdict {
        warn!(
            proposer = pair.proposer.index(),
            receiver = pair.receiver.index(),
            detected_by = %pair.detected_by,
            "Blocking pair found"
        );
        Verdict::unstable(pair)
    }

    /// Reject matchings that do not belong to this preference table
    fn check_shape(prefs: &PreferenceTable, matching: &Matching) -> Result<(), EngineError> {
        if matching.proposer_count() != prefs.proposer_count()
            || matching.receiver_count() != prefs.receiver_count()
        {
            return Err(EngineError::MatchingShape {
                reason: format!(
                    "matching is {}x{}, preferences are {}x{}",
                    matching.proposer_count(),
                    matching.receiver_count(),
                    prefs.proposer_count(),
                    prefs.receiver_count(),
                ),
            });
        }
        if !matching.is_consistent() {
            return Err(EngineError::MatchingShape {
                reason: "partner lists do not mirror each other".to_string(),
            });
        }
        Ok(())
    }

    /// Look for a blocking pair involving `agent` on `side`.
    ///
    /// An unmatched agent ranks its missing partner below every candidate.
    fn scan_agent(
        prefs: &PreferenceTable,
        matching: &Matching,
        side: Side,
        agent: usize,
    ) -> Option<BlockingPair> {
        let own = &prefs.rankings(side)[agent];
        let others = prefs.rankings(side.other());

        let partner = matching.partner(side, agent);
        let partner_rank = partner.map_or(own.len(), |p| own.rank(p));

        for (rank, &candidate) in own.order()[..partner_rank].iter().enumerate() {
            let theirs = &others[candidate];
            let holder = matching.partner(side.other(), candidate);
            let holder_rank = holder.map_or(theirs.len(), |h| theirs.rank(h));
            let agent_rank = theirs.rank(agent);

            if agent_rank < holder_rank {
                let agent_view = Standpoint {
                    id: agent,
                    partner,
                    rank_of_other: rank,
                    rank_of_partner: partner.map(|_| partner_rank),
                };
                let candidate_view = Standpoint {
                    id: candidate,
                    partner: holder,
                    rank_of_other: agent_rank,
                    rank_of_partner: holder.map(|_| holder_rank),
                };
                return Some(match side {
                    Side::Proposer => Standpoint::pair(agent_view, candidate_view, side),
                    Side::Receiver => Standpoint::pair(candidate_view, agent_view, side),
                });
            }
        }
        None
    }
}

/// One member of a blocking pair, seen from its own ranking
struct Standpoint {
    id: usize,
    partner: Option<usize>,
    rank_of_other: usize,
    rank_of_partner: Option<usize>,
}

impl Standpoint {
    fn pair(proposer: Standpoint, receiver: Standpoint, detected_by: Side) -> BlockingPair {
        BlockingPair {
            proposer: ProposerId::new(proposer.id),
            receiver: ReceiverId::new(receiver.id),
            proposer_partner: proposer.partner.map(ReceiverId::new),
            receiver_partner: receiver.partner.map(ProposerId::new),
            proposer_rank_of_receiver: proposer.rank_of_other,
            proposer_rank_of_partner: proposer.rank_of_partner,
            receiver_rank_of_proposer: receiver.rank_of_other,
            receiver_rank_of_partner: receiver.rank_of_partner,
            detected_by,
        }
    }
}
