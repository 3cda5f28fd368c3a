//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export DATABASE_URL="sqlite://data/database.sqlite3?mode=rwc"
//! export LISTEN="0.0.0.0:8080"
//! ```
//!
//! ## Optional Variables
//!
//! - `DATABASE_URL` - SQLite connection string (default: `sqlite://data/database.sqlite3?mode=rwc`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `DB_CONNECT_TIMEOUT` - Pool acquire timeout in seconds (default: 30)
//! - `STORE_TIMEOUT_MS` - Deadline for each store operation (default: 5000)
//! - `CODE_MAX_ATTEMPTS` - Insert attempts on short code collision (default: 5, max: 10)
//! - `URL_CHECK` - Require submitted URLs to answer an HTTP request (default: `true`)
//! - `URL_CHECK_TIMEOUT_MS` - Deadline for that request (default: 5000)

use anyhow::Result;
use std::env;
use std::time::Duration;

use crate::infrastructure::persistence::PoolSettings;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/database.sqlite3?mode=rwc";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,

    // ── SqlitePool settings ─────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 10).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,

    /// Deadline applied to every store operation, in milliseconds
    /// (`STORE_TIMEOUT_MS`, default: 5000).
    pub store_timeout_ms: u64,
    /// Insert attempts before a run of short code collisions is reported as a
    /// failure (`CODE_MAX_ATTEMPTS`, default: 5).
    pub code_max_attempts: usize,

    /// Whether submitted URLs must be reachable (`URL_CHECK`, default: true).
    pub url_check: bool,
    /// Deadline for the reachability request in milliseconds
    /// (`URL_CHECK_TIMEOUT_MS`, default: 5000).
    pub url_check_timeout_ms: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let db_connect_timeout = env::var("DB_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let store_timeout_ms = env::var("STORE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5_000);

        let code_max_attempts = env::var("CODE_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let url_check = env::var("URL_CHECK")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        let url_check_timeout_ms = env::var("URL_CHECK_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5_000);

        Ok(Self {
            database_url,
            listen_addr,
            log_level,
            log_format,
            db_max_connections,
            db_connect_timeout,
            store_timeout_ms,
            code_max_attempts,
            url_check,
            url_check_timeout_ms,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `database_url` is not a SQLite URL
    /// - a pool setting or an enabled timeout is zero
    /// - `code_max_attempts` is outside 1..=10
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }
        if self.store_timeout_ms == 0 {
            anyhow::bail!("STORE_TIMEOUT_MS must be greater than 0");
        }
        if self.url_check && self.url_check_timeout_ms == 0 {
            anyhow::bail!("URL_CHECK_TIMEOUT_MS must be greater than 0");
        }

        if self.code_max_attempts == 0 || self.code_max_attempts > 10 {
            anyhow::bail!(
                "CODE_MAX_ATTEMPTS must be between 1 and 10, got {}",
                self.code_max_attempts
            );
        }

        Ok(())
    }

    /// Pool settings derived from this configuration.
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            acquire_timeout: Duration::from_secs(self.db_connect_timeout),
        }
    }

    /// Deadline for each store operation.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// Deadline for the reachability request.
    pub fn url_check_timeout(&self) -> Duration {
        Duration::from_millis(self.url_check_timeout_ms)
    }

    /// Logs the effective configuration.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Store timeout: {}ms", self.store_timeout_ms);
        tracing::info!("  Code attempts: {}", self.code_max_attempts);
        if self.url_check {
            tracing::info!("  URL check: on ({}ms)", self.url_check_timeout_ms);
        } else {
            tracing::info!("  URL check: off");
        }
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn valid_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            listen_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            db_max_connections: 10,
            db_connect_timeout: 30,
            store_timeout_ms: 5_000,
            code_max_attempts: 5,
            url_check: true,
            url_check_timeout_ms: 5_000,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "8080".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:8080".to_string();

        config.database_url = "postgres://localhost/test".to_string();
        assert!(config.validate().is_err());

        config.database_url = "sqlite://data/db.sqlite3?mode=rwc".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_code_attempts_bounds() {
        let mut config = valid_config();

        config.code_max_attempts = 0;
        assert!(config.validate().is_err());

        config.code_max_attempts = 11;
        assert!(config.validate().is_err());

        config.code_max_attempts = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_store_timeout_rejected() {
        let mut config = valid_config();
        config.store_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_url_check_timeout_only_matters_when_enabled() {
        let mut config = valid_config();
        config.url_check_timeout_ms = 0;
        assert!(config.validate().is_err());

        config.url_check = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_settings() {
        let config = valid_config();
        assert_eq!(config.store_timeout(), Duration::from_secs(5));

        let pool = config.pool_settings();
        assert_eq!(pool.max_connections, 10);
        assert_eq!(pool.acquire_timeout, Duration::from_secs(30));
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("DATABASE_URL");
            env::remove_var("LISTEN");
            env::remove_var("CODE_MAX_ATTEMPTS");
            env::remove_var("URL_CHECK");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.code_max_attempts, 5);
        assert!(config.url_check);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("DATABASE_URL", "sqlite::memory:");
            env::set_var("STORE_TIMEOUT_MS", "250");
            env::set_var("CODE_MAX_ATTEMPTS", "not-a-number");
            env::set_var("URL_CHECK", "false");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.store_timeout_ms, 250);
        assert_eq!(config.code_max_attempts, 5);
        assert!(!config.url_check);

        // Cleanup
        unsafe {
            env::remove_var("DATABASE_URL");
            env::remove_var("STORE_TIMEOUT_MS");
            env::remove_var("CODE_MAX_ATTEMPTS");
            env::remove_var("URL_CHECK");
        }
    }
}
