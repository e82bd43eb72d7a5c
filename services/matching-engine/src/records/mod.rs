//! Per-agent partner records
//!
//! Flat arrays indexed by agent id. Cross-references between the two sides
//! are plain indices, never references.

pub mod proposer;
pub mod receiver;

pub use proposer::ProposerRecord;
pub use receiver::ReceiverRecord;
