//! # URL Minter
//!
//! A small URL shortener built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The mapping entity and the repository trait
//! - **Application Layer** ([`application`]) - Shortening with collision retry, resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite pool, migrations, repository
//! - **API Layer** ([`api`]) - Redirect and health endpoints
//! - **Web Layer** ([`web`]) - HTML page with the link list and form
//!
//! ## Short Codes
//!
//! A code is the first 9 characters of the base64-encoded SHA-256 of 32 random
//! alphanumerics plus a time tag (see [`utils::code_generator`]). Uniqueness is
//! guaranteed by a unique index, not by the generator; a collision on insert is
//! answered by drawing a new code.
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://data/database.sqlite3?mode=rwc"
//! cargo run
//! ```
//!
//! Migrations are applied on startup.
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::UrlMapping;
    pub use crate::domain::repositories::MappingRepository;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
    pub use crate::utils::code_generator::{CodeGenerator, HashCodeGenerator};
}
