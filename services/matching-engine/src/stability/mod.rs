//! Stability verification
//!
//! Certifies a matching against its preference table or refutes it with
//! the first blocking pair found.

pub mod verifier;

pub use verifier::StabilityVerifier;

use types::errors::EngineError;
use types::matching::Matching;
use types::preferences::PreferenceTable;
use types::verdict::Verdict;

/// Check `matching` from both sides
pub fn verify(prefs: &PreferenceTable, matching: &Matching) -> Result<Verdict, EngineError> {
    StabilityVerifier::verify(prefs, matching)
}
