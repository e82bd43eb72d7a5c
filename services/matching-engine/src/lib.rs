//! Matching Engine Service
//!
//! Deferred-acceptance (Gale–Shapley) matching over strict preference
//! rankings, plus an independent stability verifier.
//!
//! **Key Invariants:**
//! - Equal group sizes always yield a complete bijection
//! - At most proposers × receivers proposals per run
//! - The matching does not depend on the free-proposer selection order
//! - The result is optimal for the proposing side among all stable matchings

pub mod records;
pub mod matching;
pub mod engine;
pub mod events;
pub mod stability;

pub use engine::{EngineConfig, MatchingEngine, Solution};
pub use matching::SelectionOrder;
pub use stability::{verify, StabilityVerifier};
