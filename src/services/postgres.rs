use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

use crate::models::{ProspectSubmission, StoredCase};
use crate::services::repository::{CaseRepository, ProspectLog, RepositoryError};

/// PostgreSQL-backed case catalog and prospect log
///
/// The pool is owned by this store; construct one per process and share it
/// behind an `Arc`.
pub struct PostgresCaseStore {
    pool: PgPool,
}

impl PostgresCaseStore {
    /// Connect and run pending migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, RepositoryError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    fn map_case(row: &PgRow) -> Result<StoredCase, sqlx::Error> {
        Ok(StoredCase {
            id: row.try_get("id")?,
            company_name: row.try_get("company_name")?,
            url: row.try_get("url")?,
            industry: row.try_get("industry")?,
            employee_count: row.try_get("employee_count")?,
            challenges: row.try_get("challenges")?,
            reasons: row.try_get("reasons")?,
            effects: row.try_get("effects")?,
            usage_scale: row.try_get("usage_scale")?,
        })
    }
}

#[async_trait]
impl CaseRepository for PostgresCaseStore {
    /// Catalog in id order
    async fn get_all_cases(&self) -> Result<Vec<StoredCase>, RepositoryError> {
        let query = r#"
            SELECT id, company_name, url, industry, employee_count,
                   challenges, reasons, effects, usage_scale
            FROM cases
            ORDER BY id
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let cases = rows
            .iter()
            .map(Self::map_case)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Loaded {} cases from PostgreSQL", cases.len());

        Ok(cases)
    }

    async fn get_case(&self, id: i32) -> Result<Option<StoredCase>, RepositoryError> {
        let query = r#"
            SELECT id, company_name, url, industry, employee_count,
                   challenges, reasons, effects, usage_scale
            FROM cases
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::map_case).transpose()?)
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, RepositoryError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[async_trait]
impl ProspectLog for PostgresCaseStore {
    async fn record(&self, submission: &ProspectSubmission) -> Result<(), RepositoryError> {
        let query = r#"
            INSERT INTO prospects (industry, employee_count, challenges, matched_case_id, match_score, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#;

        let employee_count = submission
            .employee_count
            .and_then(|n| i32::try_from(n).ok());
        let match_score = i32::try_from(submission.match_score).unwrap_or(i32::MAX);

        sqlx::query(query)
            .bind(&submission.industry)
            .bind(employee_count)
            .bind(&submission.challenges)
            .bind(submission.matched_case_id)
            .bind(match_score)
            .bind(submission.created_at)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded prospect: industry={} matched_case_id={} score={}",
            submission.industry,
            submission.matched_case_id,
            submission.match_score
        );

        Ok(())
    }
}
