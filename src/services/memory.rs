use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::{Mutex, RwLock};

use crate::models::{CaseRecord, ProspectSubmission, StoredCase};
use crate::services::repository::{CaseRepository, ProspectLog, RepositoryError};

/// Case catalog and prospect log held in process memory
///
/// Used for local runs without a database and as a fake in tests. Outages can
/// be simulated with [`InMemoryCaseStore::set_available`] and
/// [`InMemoryCaseStore::set_prospect_log_available`].
pub struct InMemoryCaseStore {
    cases: RwLock<Vec<StoredCase>>,
    prospects: Mutex<Vec<ProspectSubmission>>,
    available: AtomicBool,
    prospect_log_available: AtomicBool,
    fetch_calls: AtomicUsize,
}

impl InMemoryCaseStore {
    pub fn new(cases: Vec<StoredCase>) -> Self {
        Self {
            cases: RwLock::new(cases),
            prospects: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            prospect_log_available: AtomicBool::new(true),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    /// Seed from decoded records, encoding their list fields
    pub fn from_records(records: &[CaseRecord]) -> Self {
        Self::new(records.iter().map(StoredCase::encode).collect())
    }

    /// Seed from a JSON file holding an array of case records
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| RepositoryError::Unavailable(format!("{}: {}", path.display(), e)))?;
        let records: Vec<CaseRecord> = serde_json::from_str(&raw)
            .map_err(|e| RepositoryError::Unavailable(format!("{}: {}", path.display(), e)))?;

        tracing::info!("Loaded {} seed cases from {}", records.len(), path.display());

        Ok(Self::from_records(&records))
    }

    pub async fn replace_cases(&self, cases: Vec<StoredCase>) {
        *self.cases.write().await = cases;
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn set_prospect_log_available(&self, available: bool) {
        self.prospect_log_available.store(available, Ordering::SeqCst);
    }

    /// Number of catalog reads served
    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub async fn recorded_prospects(&self) -> Vec<ProspectSubmission> {
        self.prospects.lock().await.clone()
    }

    fn ensure_available(&self) -> Result<(), RepositoryError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RepositoryError::Unavailable("in-memory store offline".to_string()))
        }
    }
}

impl Default for InMemoryCaseStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl CaseRepository for InMemoryCaseStore {
    async fn get_all_cases(&self) -> Result<Vec<StoredCase>, RepositoryError> {
        self.ensure_available()?;
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.cases.read().await.clone())
    }

    async fn get_case(&self, id: i32) -> Result<Option<StoredCase>, RepositoryError> {
        self.ensure_available()?;
        Ok(self.cases.read().await.iter().find(|case| case.id == id).cloned())
    }

    async fn health_check(&self) -> Result<bool, RepositoryError> {
        Ok(self.available.load(Ordering::SeqCst))
    }
}

#[async_trait]
impl ProspectLog for InMemoryCaseStore {
    async fn record(&self, submission: &ProspectSubmission) -> Result<(), RepositoryError> {
        if !self.prospect_log_available.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("prospect log offline".to_string()));
        }

        self.prospects.lock().await.push(submission.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_outage_is_an_error_not_an_empty_catalog() {
        let store = InMemoryCaseStore::default();
        assert!(store.get_all_cases().await.unwrap().is_empty());

        store.set_available(false);
        assert!(store.get_all_cases().await.is_err());
        assert!(!store.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_from_records_encodes_lists() {
        let record = CaseRecord {
            id: 3,
            company_name: "Test Co".to_string(),
            url: Some("https://example.com".to_string()),
            industry: Some("IT".to_string()),
            employee_count: Some(50),
            challenges: vec!["健康".to_string()],
            reasons: vec![],
            effects: vec![],
            usage_scale: None,
        };

        let store = InMemoryCaseStore::from_records(&[record]);
        let stored = store.get_case(3).await.unwrap().unwrap();

        assert_eq!(stored.challenges.as_deref(), Some(r#"["健康"]"#));
        assert_eq!(stored.employee_count, Some(50));
    }
}
