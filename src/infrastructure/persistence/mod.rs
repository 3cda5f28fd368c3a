//! SQLite persistence.
//!
//! Concrete implementation of the domain repository trait using SQLx, plus the
//! pool and migration helpers shared by the server, the admin CLI and tests.
//!
//! # Repositories
//!
//! - [`SqliteMappingRepository`] - Mapping storage, lookup and click accounting

pub mod pool;
pub mod sqlite_mapping_repository;

pub use pool::{MIGRATOR, PoolSettings, connect};
pub use sqlite_mapping_repository::SqliteMappingRepository;
