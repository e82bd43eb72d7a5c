//! Matching logic module
//!
//! Implements the proposal/rejection step of deferred acceptance

pub mod proposal;
pub mod selection;

pub use proposal::ProposalExecutor;
pub use selection::{FreeProposers, SelectionOrder};
