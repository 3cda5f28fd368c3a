//! Short code generation.
//!
//! Codes are derived from a random alphanumeric string plus a time tag, hashed
//! with SHA-256 and truncated to the first 9 characters of the standard base64
//! encoding of the digest. The generator never consults storage: collisions are
//! rejected by the unique index and handled by the caller.

use base64::Engine as _;
use chrono::Utc;
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Length of the final short code.
pub const CODE_LENGTH: usize = 9;

/// Number of random alphanumeric symbols fed into the hash.
const RANDOM_SYMBOLS: usize = 32;

/// Sub-second nanoseconds are truncated to 20 bits.
const SUBSEC_MASK: u32 = 0xF_FFFF;

/// Source of candidate short codes.
///
/// Implementations must not touch storage.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces a fresh candidate code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::GenerationFault`] if the entropy source is unavailable.
    fn generate(&self) -> Result<String, AppError>;
}

/// Default generator: random string + time tag, SHA-256, base64, truncate.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashCodeGenerator;

impl HashCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for HashCodeGenerator {
    fn generate(&self) -> Result<String, AppError> {
        let random = random_alphanumeric(RANDOM_SYMBOLS)?;
        let now = Utc::now();

        Ok(derive_code(
            &random,
            now.timestamp(),
            now.timestamp_subsec_nanos(),
        ))
    }
}

/// Draws `len` symbols uniformly from `[a-zA-Z0-9]`.
///
/// The RNG is seeded from the operating system; `Alphanumeric` samples each
/// symbol over the 62-symbol range without modulo bias.
fn random_alphanumeric(len: usize) -> Result<String, AppError> {
    let rng = StdRng::try_from_os_rng().map_err(|e| {
        tracing::error!("OS entropy source failed: {}", e);
        AppError::GenerationFault(e.to_string())
    })?;

    Ok(rng
        .sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect())
}

/// Builds the time-derived uniqueness tag appended to `prefix`.
///
/// Format: `prefix` + seconds as 8 hex digits + masked nanoseconds as 5 hex digits.
pub fn unique_id(prefix: &str, unix_secs: i64, subsec_nanos: u32) -> String {
    format!("{prefix}{unix_secs:08x}{:05x}", subsec_nanos & SUBSEC_MASK)
}

/// Derives a short code from its random and time inputs.
///
/// Deterministic: the same inputs always give the same code.
pub fn derive_code(random: &str, unix_secs: i64, subsec_nanos: u32) -> String {
    let digest = Sha256::digest(unique_id(random, unix_secs, subsec_nanos).as_bytes());
    let mut encoded = base64::engine::general_purpose::STANDARD.encode(digest);
    encoded.truncate(CODE_LENGTH);
    encoded
}

/// Checks that `code` has the shape produced by [`derive_code`].
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the length or alphabet is wrong.
pub fn validate_code(code: &str) -> Result<(), AppError> {
    if code.len() != CODE_LENGTH {
        return Err(AppError::bad_request(
            "Short code must be 9 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code.chars().all(is_base64_char) {
        return Err(AppError::bad_request(
            "Short code contains invalid characters",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

fn is_base64_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='
}
