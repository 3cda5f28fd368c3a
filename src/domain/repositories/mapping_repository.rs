//! Repository trait for URL mapping storage.

use crate::domain::entities::UrlMapping;
use crate::error::AppError;
use async_trait::async_trait;

/// Durable store of [`UrlMapping`] rows.
///
/// Uniqueness of short codes is enforced by the storage layer itself.
/// Implementations surface every fault to the caller and never retry
/// internally. They must be safe to share between concurrent tasks.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteMappingRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Appends one mapping and returns the number of rows affected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateCode`] if `code` already exists.
    /// Returns [`AppError::Storage`] or [`AppError::Timeout`] on backend faults.
    async fn insert(&self, original_url: &str, code: &str, clicks: i64) -> Result<u64, AppError>;

    /// Returns the original URL for an exact code match.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row has this code.
    /// Returns [`AppError::Storage`] or [`AppError::Timeout`] on backend faults.
    async fn lookup(&self, code: &str) -> Result<String, AppError>;

    /// Adds one to the click counter of `code` in a single atomic update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row has this code.
    /// Returns [`AppError::Storage`] or [`AppError::Timeout`] on backend faults.
    async fn increment_clicks(&self, code: &str) -> Result<(), AppError>;

    /// Returns every mapping in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] or [`AppError::Timeout`] on backend faults.
    async fn list_recent(&self) -> Result<Vec<UrlMapping>, AppError>;

    /// Round-trips the backend without touching rows.
    async fn ping(&self) -> Result<(), AppError>;
}
