//! Replay and determinism checks
//!
//! Two checks: the proposal log of a run must rebuild the same matching
//! when replayed, and every selection order must reach the same matching
//! on the same table.

use matching_engine::events::{ProposalEvent, ProposalOutcome};
use matching_engine::{EngineConfig, MatchingEngine, SelectionOrder, Solution};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};
use types::errors::EngineError;
use types::ids::{ProposerId, ReceiverId, Side};
use types::matching::Matching;
use types::preferences::PreferenceTable;

/// Rebuild the final matching from a proposal log.
///
/// Each accepted proposal makes its proposer the receiver's holder; the
/// last holder standing is the partner.
pub fn replay_events(
    prefs: &PreferenceTable,
    proposing: Side,
    events: &[ProposalEvent],
) -> Result<Matching, EngineError> {
    let mut holders: Vec<Option<usize>> = vec![None; prefs.group_size(proposing.other())];

    for event in events {
        if let ProposalOutcome::Accepted { .. } = event.outcome {
            let slot = holders.get_mut(event.receiver).ok_or_else(|| EngineError::MatchingShape {
                reason: format!("event {} names receiver {} outside the table", event.sequence, event.receiver),
            })?;
            *slot = Some(event.proposer);
        }
    }

    let pairs = holders.iter().enumerate().filter_map(|(receiver, holder)| {
        holder.map(|agent| match proposing {
            Side::Proposer => (ProposerId::new(agent), ReceiverId::new(receiver)),
            Side::Receiver => (ProposerId::new(receiver), ReceiverId::new(agent)),
        })
    });
    Matching::from_pairs(prefs.proposer_count(), prefs.receiver_count(), pairs)
}

/// Result of replaying a solution's proposal log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayValidation {
    pub matches: bool,
    pub original: Matching,
    pub replayed: Matching,
}

/// Replay `solution.events` and compare against `solution.matching`
pub fn validate_replay(
    prefs: &PreferenceTable,
    solution: &Solution,
) -> Result<ReplayValidation, EngineError> {
    let replayed = replay_events(prefs, solution.proposing, &solution.events)?;
    let matches = replayed == solution.matching;
    if !matches {
        warn!(events = solution.events.len(), "Replay diverged from the recorded matching");
    }

    Ok(ReplayValidation {
        matches,
        original: solution.matching.clone(),
        replayed,
    })
}

/// Export a proposal log as JSON.
pub fn export_event_log(events: &[ProposalEvent]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(events)
}

/// Import a proposal log from JSON.
pub fn import_event_log(json: &str) -> Result<Vec<ProposalEvent>, serde_json::Error> {
    serde_json::from_str(json)
}

/// One run of the order check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRun {
    pub order: SelectionOrder,
    pub proposals: u64,
    pub matching: Matching,
}

/// The same table solved under every selection order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCheck {
    pub runs: Vec<OrderRun>,
    pub all_agree: bool,
}

/// Solve `prefs` once per selection order, keeping the rest of `base`.
///
/// `seed` drives the shuffled order.
pub fn check_orders(
    prefs: &PreferenceTable,
    base: &EngineConfig,
    seed: u64,
) -> Result<OrderCheck, EngineError> {
    let mut runs = Vec::new();
    for order in SelectionOrder::all(seed) {
        let config = EngineConfig {
            selection: order,
            record_events: false,
            ..base.clone()
        };
        let solution = MatchingEngine::new(config).solve(prefs)?;
        debug!(order = %order, proposals = solution.proposals, "Order run complete");
        runs.push(OrderRun {
            order,
            proposals: solution.proposals,
            matching: solution.matching,
        });
    }

    let all_agree = runs.windows(2).all(|w| w[0].matching == w[1].matching);
    if !all_agree {
        warn!(orders = runs.len(), "Selection orders reached different matchings");
    }
    Ok(OrderCheck { runs, all_agree })
}

impl fmt::Display for OrderCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ORDER CHECK")?;
        for run in &self.runs {
            writeln!(f, "{:<14} {} proposals", run.order.to_string(), run.proposals)?;
        }
        if self.all_agree {
            write!(f, "All selection orders agree.")
        } else {
            write!(f, "Selection orders DISAGREE.")
        }
    }
}
