//! Link shortening and resolution service.

use std::sync::Arc;

use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, info, warn};

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;

/// Default number of insert attempts before giving up on collisions.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Service that mints codes, persists mappings and counts visits.
///
/// The generator never checks storage. Uniqueness is enforced by the store,
/// and a rejected insert is answered here by generating a new code.
pub struct LinkService<R: MappingRepository, G: CodeGenerator> {
    repository: Arc<R>,
    generator: Arc<G>,
    max_attempts: usize,
}

impl<R: MappingRepository, G: CodeGenerator> LinkService<R, G> {
    /// Creates a new link service with [`DEFAULT_MAX_ATTEMPTS`].
    pub fn new(repository: Arc<R>, generator: Arc<G>) -> Self {
        Self {
            repository,
            generator,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the number of insert attempts (at least one).
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Creates a mapping for `original_url` with a fresh code and zero clicks.
    ///
    /// The URL is expected to have passed a
    /// [`UrlVerifier`](crate::utils::url_verifier::UrlVerifier) already.
    ///
    /// # Code Generation
    ///
    /// Each attempt draws a new code. Only [`AppError::DuplicateCode`] triggers
    /// another attempt; any other failure is returned immediately.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty.
    /// Returns [`AppError::Internal`] if every attempt collided.
    /// Returns [`AppError::GenerationFault`] if the entropy source failed.
    /// Returns [`AppError::Storage`] or [`AppError::Timeout`] on store faults.
    pub async fn shorten(&self, original_url: &str) -> Result<UrlMapping, AppError> {
        let original_url = original_url.trim();
        if original_url.is_empty() {
            return Err(AppError::bad_request("URL cannot be empty", json!({})));
        }

        let strategy = FixedInterval::from_millis(0).take(self.max_attempts - 1);

        let result = RetryIf::spawn(
            strategy,
            || {
                let repository = Arc::clone(&self.repository);
                let candidate = self.generator.generate();
                let original_url = original_url.to_string();

                async move {
                    let code = candidate?;
                    repository.insert(&original_url, &code, 0).await?;
                    Ok::<String, AppError>(code)
                }
            },
            |err: &AppError| {
                let collided = matches!(err, AppError::DuplicateCode { .. });
                if collided {
                    warn!("Short code collision: {}", err);
                    metrics::counter!("code_collisions_total").increment(1);
                }
                collided
            },
        )
        .await;

        match result {
            Ok(code) => {
                info!("Shortened [{}] to [{}]", original_url, code);
                metrics::counter!("links_created_total").increment(1);
                Ok(UrlMapping::new(original_url.to_string(), code, 0))
            }
            Err(AppError::DuplicateCode { .. }) => Err(AppError::internal(
                "Failed to generate unique code",
                json!({ "reason": "Too many collisions", "attempts": self.max_attempts }),
            )),
            Err(e) => Err(e),
        }
    }

    /// Resolves `code` to its original URL and records one visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    /// Returns [`AppError::Storage`] or [`AppError::Timeout`] on store faults.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let original_url = self.repository.lookup(code).await?;
        self.repository.increment_clicks(code).await?;

        debug!("Resolved [{}] to [{}]", code, original_url);
        metrics::counter!("links_resolved_total").increment(1);

        Ok(original_url)
    }

    /// Returns the original URL for `code` without recording a visit.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn lookup(&self, code: &str) -> Result<String, AppError> {
        self.repository.lookup(code).await
    }

    /// Returns every mapping in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] or [`AppError::Timeout`] on store faults.
    pub async fn list_recent(&self) -> Result<Vec<UrlMapping>, AppError> {
        self.repository.list_recent().await
    }

    /// Checks that the store answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] or [`AppError::Timeout`] on store faults.
    pub async fn health(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
