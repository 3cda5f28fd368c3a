//! URL verification performed before a short code is minted.
//!
//! The store never sees a URL that has not passed a [`UrlVerifier`].
//! [`SyntaxVerifier`] checks structure only. [`ReachabilityVerifier`] adds an
//! HTTP request to the target and refuses URLs that do not answer with a
//! success status. Accepted URLs are returned in their serialized form, which
//! is always a valid `Location` header value.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

/// Default deadline for the reachability request.
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Reasons a URL is refused.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlVerificationError {
    #[error("URL cannot be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,

    /// Well-formed, but the target did not answer with a success status.
    #[error("URL was not reachable: {0}")]
    Unreachable(String),
}

/// Gatekeeper consulted before shortening.
#[async_trait]
pub trait UrlVerifier: Send + Sync {
    /// Returns the URL to store for `input`.
    ///
    /// # Errors
    ///
    /// Returns [`UrlVerificationError`] when `input` must not be shortened.
    async fn verify(&self, input: &str) -> Result<String, UrlVerificationError>;
}

/// Accepts absolute `http`/`https` URLs with a host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxVerifier;

impl SyntaxVerifier {
    fn check(&self, input: &str) -> Result<Url, UrlVerificationError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(UrlVerificationError::Empty);
        }

        let url =
            Url::parse(input).map_err(|e| UrlVerificationError::InvalidFormat(e.to_string()))?;

        match url.scheme() {
            "http" | "https" => {}
            _ => return Err(UrlVerificationError::UnsupportedProtocol),
        }

        match url.host_str() {
            Some(host) if !host.is_empty() => Ok(url),
            _ => Err(UrlVerificationError::MissingHost),
        }
    }
}

#[async_trait]
impl UrlVerifier for SyntaxVerifier {
    async fn verify(&self, input: &str) -> Result<String, UrlVerificationError> {
        self.check(input).map(|url| url.to_string())
    }
}

/// [`SyntaxVerifier`] followed by a `GET` to the target.
///
/// Redirects are followed. Any transport failure, timeout or non-2xx final
/// status makes the URL [`UrlVerificationError::Unreachable`].
#[derive(Debug, Clone)]
pub struct ReachabilityVerifier {
    syntax: SyntaxVerifier,
    client: reqwest::Client,
}

impl ReachabilityVerifier {
    pub fn new(timeout: Duration) -> Self {
        Self {
            syntax: SyntaxVerifier,
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for ReachabilityVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_CHECK_TIMEOUT)
    }
}

#[async_trait]
impl UrlVerifier for ReachabilityVerifier {
    async fn verify(&self, input: &str) -> Result<String, UrlVerificationError> {
        let url = self.syntax.check(input)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("Reachability request to [{}] failed: {}", url, e);
                UrlVerificationError::Unreachable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UrlVerificationError::Unreachable(format!(
                "HTTP status {}",
                status
            )));
        }

        Ok(url.to_string())
    }
}
