//! Infrastructure layer for external integrations.
//!
//! - [`persistence`] - SQLite pool setup, migrations and repository implementation

pub mod persistence;
