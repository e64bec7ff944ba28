use std::sync::Arc;
use thiserror::Error;

use crate::core::Matcher;
use crate::models::{CaseLists, CaseRecord, MatchResult, ProspectQuery, ProspectSubmission, RecordDecodeError, StoredCase};
use crate::services::repository::{CaseRepository, ProspectLog, RepositoryError};

/// Failure kinds of the matching service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchErrorKind {
    DataUnavailable,
    NoCandidatesRemaining,
    RecordDecode,
    Persistence,
}

impl MatchErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchErrorKind::DataUnavailable => "data_unavailable",
            MatchErrorKind::NoCandidatesRemaining => "no_candidates_remaining",
            MatchErrorKind::RecordDecode => "record_decode_error",
            MatchErrorKind::Persistence => "persistence_error",
        }
    }

    /// Whether the same request may succeed later
    pub fn is_retryable(&self) -> bool {
        matches!(self, MatchErrorKind::DataUnavailable)
    }
}

/// Errors produced while matching a prospect.
///
/// `cause` carries diagnostics only and is never inspected by callers.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Case data unavailable: {}", .cause.as_deref().unwrap_or("catalog is empty"))]
    DataUnavailable { cause: Option<String> },

    #[error("No more candidate cases to show")]
    NoCandidatesRemaining,

    #[error("Record decode error: {0}")]
    RecordDecode(#[from] RecordDecodeError),

    #[error("Failed to record prospect: {cause}")]
    Persistence { cause: String },
}

impl From<RepositoryError> for MatchError {
    fn from(err: RepositoryError) -> Self {
        MatchError::DataUnavailable {
            cause: Some(err.to_string()),
        }
    }
}

impl MatchError {
    pub fn kind(&self) -> MatchErrorKind {
        match self {
            MatchError::DataUnavailable { .. } => MatchErrorKind::DataUnavailable,
            MatchError::NoCandidatesRemaining => MatchErrorKind::NoCandidatesRemaining,
            MatchError::RecordDecode(_) => MatchErrorKind::RecordDecode,
            MatchError::Persistence { .. } => MatchErrorKind::Persistence,
        }
    }
}

/// Turns prospect queries into match results
///
/// Holds no per-request state; clones share the same repository handles.
#[derive(Clone)]
pub struct MatchService {
    cases: Arc<dyn CaseRepository>,
    prospects: Option<Arc<dyn ProspectLog>>,
    matcher: Matcher,
}

impl MatchService {
    pub fn new(cases: Arc<dyn CaseRepository>, matcher: Matcher) -> Self {
        Self {
            cases,
            prospects: None,
            matcher,
        }
    }

    /// Record every successful match to `prospects`
    pub fn with_prospect_log(mut self, prospects: Arc<dyn ProspectLog>) -> Self {
        self.prospects = Some(prospects);
        self
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Find the best case for a prospect
    pub async fn match_case(&self, query: &ProspectQuery) -> Result<MatchResult, MatchError> {
        let stored = self.cases.get_all_cases().await.map_err(|e| {
            tracing::error!("Failed to load case catalog: {}", e);
            MatchError::from(e)
        })?;

        tracing::info!("Retrieved {} cases from catalog", stored.len());

        if stored.is_empty() {
            tracing::warn!("Case catalog is empty");
            return Err(MatchError::DataUnavailable { cause: None });
        }

        let candidates: Vec<CaseRecord> = stored.into_iter().map(decode_case).collect();

        let ranking = self.matcher.rank(query, candidates);
        let total_candidates = ranking.total_candidates;

        let result = match ranking.into_best() {
            Some(best) => MatchResult::from(best),
            None => {
                tracing::info!(
                    "All {} cases excluded ({} exclude ids)",
                    total_candidates,
                    query.exclude_ids.len()
                );
                return Err(MatchError::NoCandidatesRemaining);
            }
        };

        tracing::info!(
            "Best match: case {} with score {} (from {} candidates)",
            result.matched_case.id,
            result.match_score,
            total_candidates
        );

        self.record_prospect(query, &result).await;

        Ok(result)
    }

    /// Entire catalog, decoded, without scoring
    pub async fn all_cases(&self) -> Result<Vec<CaseRecord>, MatchError> {
        let stored = self.cases.get_all_cases().await.map_err(|e| {
            tracing::error!("Failed to load case catalog: {}", e);
            MatchError::from(e)
        })?;

        Ok(stored.into_iter().map(decode_case).collect())
    }

    /// A single decoded case
    pub async fn get_case(&self, id: i32) -> Result<Option<CaseRecord>, MatchError> {
        let stored = self.cases.get_case(id).await.map_err(|e| {
            tracing::error!("Failed to load case {}: {}", id, e);
            MatchError::from(e)
        })?;

        Ok(stored.map(decode_case))
    }

    pub async fn health_check(&self) -> bool {
        match self.cases.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                tracing::warn!("Case store health check failed: {}", e);
                false
            }
        }
    }

    async fn record_prospect(&self, query: &ProspectQuery, result: &MatchResult) {
        let Some(prospects) = &self.prospects else {
            return;
        };

        let submission = ProspectSubmission::new(query, result);
        match prospects.record(&submission).await {
            Ok(()) => tracing::debug!("Prospect submission recorded"),
            Err(e) => {
                let err = MatchError::Persistence {
                    cause: e.to_string(),
                };
                tracing::warn!(kind = err.kind().as_str(), "{}", err);
            }
        }
    }
}

/// Decode a stored case, substituting empty lists when a list field is malformed
fn decode_case(stored: StoredCase) -> CaseRecord {
    let lists = stored.decode_lists().unwrap_or_else(|e| {
        let err = MatchError::from(e);
        tracing::warn!(kind = err.kind().as_str(), "{}", err);
        CaseLists::default()
    });

    stored.into_record(lists)
}
