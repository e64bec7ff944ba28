use std::collections::BTreeSet;

use crate::core::keywords::KeywordVocabulary;
use crate::models::CaseRecord;

/// How a prospect's industry relates to a case's industry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndustryMatch {
    Exact,
    Similar,
    Unrelated,
}

/// Relative company size bucket, derived from the employee-count ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// ratio < 0.2
    Near,
    /// 0.2 <= ratio < 0.5
    Comparable,
    /// 0.5 <= ratio < 1.0
    Distant,
    /// ratio >= 1.0
    Unrelated,
}

/// Check whether a case has already been shown to the caller
#[inline]
pub fn is_excluded(case: &CaseRecord, exclude_ids: &BTreeSet<i32>) -> bool {
    exclude_ids.contains(&case.id)
}

/// Compare industries.
///
/// Comparison is case-sensitive and un-normalized. A missing or empty case industry
/// never matches, and an empty prospect industry never counts as a substring.
#[inline]
pub fn match_industry(prospect: &str, case: Option<&str>) -> IndustryMatch {
    let case = match case {
        Some(industry) if !industry.is_empty() => industry,
        _ => return IndustryMatch::Unrelated,
    };

    if prospect == case {
        IndustryMatch::Exact
    } else if !prospect.is_empty() && (case.contains(prospect) || prospect.contains(case)) {
        IndustryMatch::Similar
    } else {
        IndustryMatch::Unrelated
    }
}

/// `|a - b| / max(a, b)`, with two empty companies treated as identical
#[inline]
pub fn size_ratio(a: u32, b: u32) -> f64 {
    let larger = a.max(b);
    if larger == 0 {
        return 0.0;
    }

    f64::from(a.abs_diff(b)) / f64::from(larger)
}

/// Bucket two employee counts. Returns `None` when either side is unknown.
#[inline]
pub fn classify_size(prospect: Option<u32>, case: Option<u32>) -> Option<SizeTier> {
    let (prospect, case) = (prospect?, case?);
    let ratio = size_ratio(prospect, case);

    let tier = if ratio < 0.2 {
        SizeTier::Near
    } else if ratio < 0.5 {
        SizeTier::Comparable
    } else if ratio < 1.0 {
        SizeTier::Distant
    } else {
        SizeTier::Unrelated
    };

    Some(tier)
}

/// Case challenges sharing at least one vocabulary keyword with the prospect text.
///
/// Each case challenge is counted at most once, in case order.
pub fn shared_challenges<'a>(
    prospect_challenges: &str,
    case_challenges: &'a [String],
    vocabulary: &KeywordVocabulary,
) -> Vec<&'a str> {
    let prospect_lower = prospect_challenges.to_lowercase();

    case_challenges
        .iter()
        .filter(|challenge| {
            let challenge_lower = challenge.to_lowercase();
            vocabulary
                .first_shared(&prospect_lower, &challenge_lower)
                .is_some()
        })
        .map(String::as_str)
        .collect()
}
