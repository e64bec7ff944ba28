use crate::core::filters::{classify_size, match_industry, shared_challenges, IndustryMatch, SizeTier};
use crate::core::keywords::KeywordVocabulary;
use crate::models::{CaseRecord, ProspectQuery};

pub const INDUSTRY_EXACT_POINTS: u32 = 30;
pub const INDUSTRY_SIMILAR_POINTS: u32 = 15;
pub const SIZE_NEAR_POINTS: u32 = 40;
pub const SIZE_COMPARABLE_POINTS: u32 = 27;
pub const SIZE_DISTANT_POINTS: u32 = 13;
pub const CHALLENGE_POINTS_PER_MATCH: u32 = 10;
pub const CHALLENGE_MAX_POINTS: u32 = 30;

/// Upper bound of a match score: 30 (industry) + 40 (size) + 30 (challenges)
pub const MAX_SCORE: u32 = 100;

const REASON_CHALLENGE_LIMIT: usize = 2;
const REASON_CHALLENGE_SEPARATOR: &str = "、";

/// Calculate a match score (0-100) between a prospect and one case
///
/// Scoring formula (non-matching components contribute nothing):
/// score = (
///     industry     # 30 exact, 15 substring, 0 otherwise
///   + size         # 40 / 27 / 13 / 0 by employee-count ratio
///   + challenges   # 10 per shared challenge, capped at 30
/// )
///
/// Reasons are returned in component order: industry, size, challenges.
pub fn calculate_match_score(
    prospect: &ProspectQuery,
    case: &CaseRecord,
    vocabulary: &KeywordVocabulary,
) -> (u32, Vec<String>) {
    let mut reasons = Vec::with_capacity(3);

    let components = [
        industry_score(&prospect.industry, case.industry.as_deref()),
        size_score(prospect.employee_count, case.employee_count),
        challenge_score(&prospect.challenges, &case.challenges, vocabulary),
    ];

    let mut total = 0;
    for (points, reason) in components {
        total += points;
        reasons.extend(reason);
    }

    (total.min(MAX_SCORE), reasons)
}

#[inline]
fn industry_score(prospect: &str, case: Option<&str>) -> (u32, Option<String>) {
    match match_industry(prospect, case) {
        IndustryMatch::Exact => (
            INDUSTRY_EXACT_POINTS,
            Some(format!("同じ業界（{}）の導入実績があります", prospect)),
        ),
        IndustryMatch::Similar => (
            INDUSTRY_SIMILAR_POINTS,
            Some(format!(
                "類似業界（{}）の導入実績があります",
                case.unwrap_or_default()
            )),
        ),
        IndustryMatch::Unrelated => (0, None),
    }
}

#[inline]
fn size_score(prospect: Option<u32>, case: Option<u32>) -> (u32, Option<String>) {
    let (tier, count) = match (classify_size(prospect, case), case) {
        (Some(tier), Some(count)) => (tier, count),
        _ => return (0, None),
    };

    match tier {
        SizeTier::Near => (
            SIZE_NEAR_POINTS,
            Some(format!("従業員数が近い規模（{}名）の企業です", count)),
        ),
        SizeTier::Comparable => (
            SIZE_COMPARABLE_POINTS,
            Some(format!("従業員数が比較的近い規模（{}名）の企業です", count)),
        ),
        SizeTier::Distant => (
            SIZE_DISTANT_POINTS,
            Some(format!("従業員数は{}名の企業です", count)),
        ),
        SizeTier::Unrelated => (0, None),
    }
}

fn challenge_score(
    prospect: &str,
    case_challenges: &[String],
    vocabulary: &KeywordVocabulary,
) -> (u32, Option<String>) {
    let shared = shared_challenges(prospect, case_challenges, vocabulary);
    if shared.is_empty() {
        return (0, None);
    }

    let matches = u32::try_from(shared.len()).unwrap_or(u32::MAX);
    let points = matches
        .saturating_mul(CHALLENGE_POINTS_PER_MATCH)
        .min(CHALLENGE_MAX_POINTS);

    let listed: Vec<&str> = shared.into_iter().take(REASON_CHALLENGE_LIMIT).collect();
    let reason = format!(
        "類似の課題（{}）を抱えていました",
        listed.join(REASON_CHALLENGE_SEPARATOR)
    );

    (points, Some(reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_case(industry: Option<&str>, employees: Option<u32>, challenges: &[&str]) -> CaseRecord {
        CaseRecord {
            id: 1,
            company_name: "Test Co".to_string(),
            url: None,
            industry: industry.map(str::to_string),
            employee_count: employees,
            challenges: challenges.iter().map(|c| c.to_string()).collect(),
            reasons: vec![],
            effects: vec![],
            usage_scale: None,
        }
    }

    fn create_test_prospect(industry: &str, employees: Option<u32>, challenges: &str) -> ProspectQuery {
        ProspectQuery {
            industry: industry.to_string(),
            employee_count: employees,
            challenges: challenges.to_string(),
            exclude_ids: Default::default(),
        }
    }

    #[test]
    fn test_full_match() {
        let case = create_test_case(Some("IT"), Some(100), &["健康経営への関心"]);
        let prospect = create_test_prospect("IT", Some(100), "健康");

        let (score, reasons) = calculate_match_score(&prospect, &case, &KeywordVocabulary::default());

        assert_eq!(score, 80);
        assert_eq!(
            reasons,
            vec![
                "同じ業界（IT）の導入実績があります",
                "従業員数が近い規模（100名）の企業です",
                "類似の課題（健康経営への関心）を抱えていました",
            ]
        );
    }

    #[test]
    fn test_similar_industry() {
        let case = create_test_case(Some("IT・通信"), None, &[]);
        let prospect = create_test_prospect("IT", None, "");

        let (score, reasons) = calculate_match_score(&prospect, &case, &KeywordVocabulary::default());

        assert_eq!(score, INDUSTRY_SIMILAR_POINTS);
        assert_eq!(reasons, vec!["類似業界（IT・通信）の導入実績があります"]);
    }

    #[test]
    fn test_no_match_scores_zero() {
        let case = create_test_case(Some("小売"), Some(10), &["離職率"]);
        let prospect = create_test_prospect("IT", None, "採用");

        let (score, reasons) = calculate_match_score(&prospect, &case, &KeywordVocabulary::default());

        assert_eq!(score, 0);
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_size_tiers() {
        assert_eq!(size_score(Some(100), Some(90)).0, SIZE_NEAR_POINTS);
        assert_eq!(size_score(Some(100), Some(70)).0, SIZE_COMPARABLE_POINTS);
        assert_eq!(size_score(Some(100), Some(40)).0, SIZE_DISTANT_POINTS);
        assert_eq!(size_score(Some(100), Some(0)), (0, None));
        assert_eq!(size_score(None, Some(100)), (0, None));
    }

    #[test]
    fn test_distant_size_reason_names_case_count() {
        let (_, reason) = size_score(Some(1000), Some(400));
        assert_eq!(reason.as_deref(), Some("従業員数は400名の企業です"));
    }

    #[test]
    fn test_challenge_score_is_capped() {
        let case = create_test_case(
            None,
            None,
            &["健康課題", "食事の偏り", "野菜不足", "栄養バランス"],
        );
        let prospect = create_test_prospect("IT", None, "健康 食事 野菜 栄養");

        let (score, reasons) = calculate_match_score(&prospect, &case, &KeywordVocabulary::default());

        assert_eq!(score, CHALLENGE_MAX_POINTS);
        assert_eq!(reasons, vec!["類似の課題（健康課題、食事の偏り）を抱えていました"]);
    }
}
