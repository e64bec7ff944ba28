//! Case Match - lead-to-case-study matching service
//!
//! Scores a prospect (industry, employee count, stated challenges) against a
//! catalog of customer case studies and returns the best match together with
//! human-readable reasons.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match_score, KeywordVocabulary, Matcher};
pub use crate::models::{CaseRecord, MatchCaseRequest, MatchResult, ProspectQuery, StoredCase};
pub use crate::services::{MatchError, MatchErrorKind, MatchService};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        assert!(!matcher.vocabulary().is_empty());
    }
}
