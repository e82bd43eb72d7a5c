//! Types library for the stable matching workspace
//!
//! This library provides the core type definitions shared by the matching
//! engine and the simulation tooling.
//!
//! # Modules
//! - `ids`: Agent identifiers (ProposerId, ReceiverId) and group sides
//! - `preferences`: Validated strict rankings and the preference table
//! - `matching`: One-to-one matchings between the two groups
//! - `verdict`: Stability verdicts and blocking-pair witnesses
//! - `errors`: Error taxonomy

pub mod ids;
pub mod preferences;
pub mod matching;
pub mod verdict;
pub mod errors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::preferences::*;
    pub use crate::matching::*;
    pub use crate::verdict::*;
    pub use crate::errors::*;
}
