use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::models::StoredCase;
use crate::services::repository::{CaseRepository, RepositoryError};

const CATALOG_KEY: &str = "cases:all";

/// In-memory catalog cache in front of another repository
///
/// The catalog only changes on batch import, so holding it for a short TTL
/// spares a full table scan per match request. Errors and empty catalogs are
/// never cached.
pub struct CachedCaseRepository {
    inner: Arc<dyn CaseRepository>,
    catalog: moka::future::Cache<String, Arc<Vec<StoredCase>>>,
}

impl CachedCaseRepository {
    pub fn new(inner: Arc<dyn CaseRepository>, ttl_secs: u64) -> Self {
        let catalog = moka::future::CacheBuilder::new(1)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, catalog }
    }

    async fn load_catalog(&self) -> Result<Arc<Vec<StoredCase>>, RepositoryError> {
        if let Some(cases) = self.catalog.get(CATALOG_KEY).await {
            tracing::trace!("Catalog cache hit");
            return Ok(cases);
        }

        tracing::trace!("Catalog cache miss");
        let cases = Arc::new(self.inner.get_all_cases().await?);
        if !cases.is_empty() {
            self.catalog
                .insert(CATALOG_KEY.to_string(), Arc::clone(&cases))
                .await;
        }

        Ok(cases)
    }

    /// Drop the cached catalog, e.g. after a re-import
    pub async fn invalidate(&self) {
        self.catalog.invalidate(CATALOG_KEY).await;
        tracing::debug!("Invalidated catalog cache");
    }
}

#[async_trait]
impl CaseRepository for CachedCaseRepository {
    async fn get_all_cases(&self) -> Result<Vec<StoredCase>, RepositoryError> {
        let cases = self.load_catalog().await?;
        Ok(cases.as_ref().clone())
    }

    async fn get_case(&self, id: i32) -> Result<Option<StoredCase>, RepositoryError> {
        let cases = self.load_catalog().await?;
        Ok(cases.iter().find(|case| case.id == id).cloned())
    }

    async fn health_check(&self) -> Result<bool, RepositoryError> {
        self.inner.health_check().await
    }
}
