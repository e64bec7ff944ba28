use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Case study with its list fields decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: i32,
    #[serde(rename = "companyName")]
    pub company_name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(rename = "employeeCount", default)]
    pub employee_count: Option<u32>,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub effects: Vec<String>,
    #[serde(rename = "usageScale", default)]
    pub usage_scale: Option<String>,
}

/// Case study as stored: list fields are JSON-encoded text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCase {
    pub id: i32,
    pub company_name: String,
    pub url: Option<String>,
    pub industry: Option<String>,
    pub employee_count: Option<i32>,
    pub challenges: Option<String>,
    pub reasons: Option<String>,
    pub effects: Option<String>,
    pub usage_scale: Option<String>,
}

/// Decoded list fields of one case
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseLists {
    pub challenges: Vec<String>,
    pub reasons: Vec<String>,
    pub effects: Vec<String>,
}

/// Incoming lead description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProspectQuery {
    pub industry: String,
    #[serde(rename = "employeeCount", default)]
    pub employee_count: Option<u32>,
    pub challenges: String,
    /// Case ids already shown to the caller
    #[serde(rename = "excludeIds", default)]
    pub exclude_ids: BTreeSet<i32>,
}

/// A case together with its score against one prospect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCase {
    pub case: CaseRecord,
    pub score: u32,
    pub reasons: Vec<String>,
}

/// Best match returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "matchedCase")]
    pub matched_case: CaseRecord,
    #[serde(rename = "matchScore")]
    pub match_score: u32,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
}

impl From<ScoredCase> for MatchResult {
    fn from(scored: ScoredCase) -> Self {
        Self {
            matched_case: scored.case,
            match_score: scored.score,
            match_reasons: scored.reasons,
        }
    }
}

/// Prospect submission recorded after a successful match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProspectSubmission {
    pub industry: String,
    pub employee_count: Option<u32>,
    pub challenges: String,
    pub matched_case_id: i32,
    pub match_score: u32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ProspectSubmission {
    pub fn new(query: &ProspectQuery, result: &MatchResult) -> Self {
        Self {
            industry: query.industry.clone(),
            employee_count: query.employee_count,
            challenges: query.challenges.clone(),
            matched_case_id: result.matched_case.id,
            match_score: result.match_score,
            created_at: chrono::Utc::now(),
        }
    }
}
