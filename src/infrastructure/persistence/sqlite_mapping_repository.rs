//! SQLite implementation of the mapping repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::SqlitePool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::MappingRepository;
use crate::error::{AppError, map_insert_error};

/// Default per-operation deadline.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite repository for the `urls` table.
///
/// Every statement runs under a deadline; an expired deadline is reported as
/// [`AppError::Timeout`]. The pool is shared, so one instance can serve any
/// number of concurrent callers.
pub struct SqliteMappingRepository {
    pool: Arc<SqlitePool>,
    op_timeout: Duration,
}

impl SqliteMappingRepository {
    /// Creates a new repository with the default operation timeout.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self::with_timeout(pool, DEFAULT_OP_TIMEOUT)
    }

    /// Creates a new repository with an explicit operation timeout.
    pub fn with_timeout(pool: Arc<SqlitePool>, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    async fn bounded<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        tokio::time::timeout(self.op_timeout, op)
            .await
            .map_err(|_| AppError::Timeout(self.op_timeout))?
    }
}

#[async_trait]
impl MappingRepository for SqliteMappingRepository {
    async fn insert(&self, original_url: &str, code: &str, clicks: i64) -> Result<u64, AppError> {
        if clicks < 0 {
            return Err(AppError::bad_request(
                "Initial click count must not be negative",
                json!({ "clicks": clicks }),
            ));
        }

        self.bounded(async {
            let result = sqlx::query(
                "INSERT INTO urls (original_url, shortened_url, clicks) VALUES (?1, ?2, ?3)",
            )
            .bind(original_url)
            .bind(code)
            .bind(clicks)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| map_insert_error(e, code))?;

            Ok::<_, AppError>(result.rows_affected())
        })
        .await
    }

    async fn lookup(&self, code: &str) -> Result<String, AppError> {
        let row: Option<String> = self
            .bounded(async {
                let row = sqlx::query_scalar::<_, String>(
                    "SELECT original_url FROM urls WHERE shortened_url = ?1",
                )
                .bind(code)
                .fetch_optional(self.pool.as_ref())
                .await?;
                Ok::<_, AppError>(row)
            })
            .await?;

        row.ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), AppError> {
        let affected = self
            .bounded(async {
                let result =
                    sqlx::query("UPDATE urls SET clicks = clicks + 1 WHERE shortened_url = ?1")
                        .bind(code)
                        .execute(self.pool.as_ref())
                        .await?;
                Ok::<_, AppError>(result.rows_affected())
            })
            .await?;

        if affected == 0 {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<UrlMapping>, AppError> {
        self.bounded(async {
            let rows = sqlx::query_as::<_, UrlMapping>(
                "SELECT original_url, shortened_url, clicks FROM urls ORDER BY rowid",
            )
            .fetch_all(self.pool.as_ref())
            .await?;
            Ok::<_, AppError>(rows)
        })
        .await
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.bounded(async {
            sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
            Ok::<_, AppError>(())
        })
        .await
    }
}
