use crate::core::{filters::is_excluded, keywords::KeywordVocabulary, scoring::calculate_match_score};
use crate::models::{CaseRecord, MatchResult, ProspectQuery, ScoredCase};

/// Result of ranking a catalog against one prospect
#[derive(Debug)]
pub struct Ranking {
    /// Eligible cases, best first
    pub ranked: Vec<ScoredCase>,
    /// Catalog size before exclusion
    pub total_candidates: usize,
}

impl Ranking {
    pub fn best(&self) -> Option<&ScoredCase> {
        self.ranked.first()
    }

    pub fn into_best(self) -> Option<ScoredCase> {
        self.ranked.into_iter().next()
    }
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Drop cases the caller has already seen
/// 2. Score every remaining case
/// 3. Rank by score, lowest case id first on ties
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    vocabulary: KeywordVocabulary,
}

impl Matcher {
    pub fn new(vocabulary: KeywordVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn with_default_vocabulary() -> Self {
        Self::default()
    }

    pub fn vocabulary(&self) -> &KeywordVocabulary {
        &self.vocabulary
    }

    /// Score a single case
    #[inline]
    pub fn score(&self, prospect: &ProspectQuery, case: &CaseRecord) -> (u32, Vec<String>) {
        calculate_match_score(prospect, case, &self.vocabulary)
    }

    /// Rank all eligible candidates for a prospect
    pub fn rank(&self, prospect: &ProspectQuery, candidates: Vec<CaseRecord>) -> Ranking {
        let total_candidates = candidates.len();

        let mut ranked: Vec<ScoredCase> = candidates
            .into_iter()
            .filter(|case| !is_excluded(case, &prospect.exclude_ids))
            .map(|case| {
                let (score, reasons) = self.score(prospect, &case);
                ScoredCase { case, score, reasons }
            })
            .collect();

        // Sort by score (descending) and then by id (ascending)
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.case.id.cmp(&b.case.id))
        });

        Ranking {
            ranked,
            total_candidates,
        }
    }

    /// Best eligible case, or `None` when every candidate is excluded
    pub fn find_best_match(
        &self,
        prospect: &ProspectQuery,
        candidates: Vec<CaseRecord>,
    ) -> Option<MatchResult> {
        self.rank(prospect, candidates)
            .into_best()
            .map(MatchResult::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn create_candidate(id: i32, industry: &str, employees: u32, challenges: &[&str]) -> CaseRecord {
        CaseRecord {
            id,
            company_name: format!("Company {}", id),
            url: None,
            industry: Some(industry.to_string()),
            employee_count: Some(employees),
            challenges: challenges.iter().map(|c| c.to_string()).collect(),
            reasons: vec![],
            effects: vec![],
            usage_scale: None,
        }
    }

    fn create_prospect(exclude: &[i32]) -> ProspectQuery {
        ProspectQuery {
            industry: "IT".to_string(),
            employee_count: Some(100),
            challenges: "健康".to_string(),
            exclude_ids: exclude.iter().copied().collect::<BTreeSet<i32>>(),
        }
    }

    #[test]
    fn test_find_best_match_basic() {
        let matcher = Matcher::with_default_vocabulary();

        let candidates = vec![
            create_candidate(1, "IT", 100, &["健康経営への関心"]),
            create_candidate(2, "IT", 95, &["コミュニケーション不足"]),
        ];

        let result = matcher
            .find_best_match(&create_prospect(&[]), candidates)
            .expect("expected a match");

        assert_eq!(result.matched_case.id, 1);
        assert_eq!(result.match_score, 80);
        assert_eq!(result.match_reasons.len(), 3);
    }

    #[test]
    fn test_rank_sorted_by_score() {
        let matcher = Matcher::with_default_vocabulary();

        let candidates = vec![
            create_candidate(1, "小売", 5000, &[]),
            create_candidate(2, "IT", 100, &["健康"]),
            create_candidate(3, "IT", 60, &[]),
        ];

        let ranking = matcher.rank(&create_prospect(&[]), candidates);

        let ids: Vec<i32> = ranking.ranked.iter().map(|m| m.case.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(ranking.total_candidates, 3);
    }

    #[test]
    fn test_ties_prefer_lowest_id() {
        let matcher = Matcher::with_default_vocabulary();

        let candidates = vec![
            create_candidate(9, "IT", 100, &[]),
            create_candidate(4, "IT", 100, &[]),
            create_candidate(7, "IT", 100, &[]),
        ];

        let ranking = matcher.rank(&create_prospect(&[]), candidates);

        assert_eq!(ranking.best().map(|m| m.case.id), Some(4));
    }

    #[test]
    fn test_excluded_cases_are_skipped() {
        let matcher = Matcher::with_default_vocabulary();

        let candidates = vec![
            create_candidate(1, "IT", 100, &["健康経営への関心"]),
            create_candidate(2, "IT", 95, &["コミュニケーション不足"]),
        ];

        let ranking = matcher.rank(&create_prospect(&[1]), candidates);

        assert_eq!(ranking.ranked.len(), 1);
        assert_eq!(ranking.best().map(|m| m.case.id), Some(2));
        assert_eq!(ranking.total_candidates, 2);
    }

    #[test]
    fn test_everything_excluded() {
        let matcher = Matcher::with_default_vocabulary();
        let candidates = vec![create_candidate(1, "IT", 100, &[])];

        assert!(matcher.find_best_match(&create_prospect(&[1]), candidates).is_none());
    }
}
