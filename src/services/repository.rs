use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ProspectSubmission, StoredCase};

/// Errors raised by case and prospect stores
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// Read access to the case catalog.
///
/// Implementations must return an error, not an empty list, when the
/// underlying store cannot be reached.
#[async_trait]
pub trait CaseRepository: Send + Sync {
    async fn get_all_cases(&self) -> Result<Vec<StoredCase>, RepositoryError>;

    async fn get_case(&self, id: i32) -> Result<Option<StoredCase>, RepositoryError>;

    async fn health_check(&self) -> Result<bool, RepositoryError>;
}

/// Sink for prospect submissions
#[async_trait]
pub trait ProspectLog: Send + Sync {
    async fn record(&self, submission: &ProspectSubmission) -> Result<(), RepositoryError>;
}
