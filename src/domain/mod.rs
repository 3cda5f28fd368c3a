//! Domain layer: the mapping entity and the storage contract.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//!
//! Code generation lives in [`crate::utils::code_generator`] and has no
//! dependency on storage; orchestration lives in
//! [`crate::application::services`].

pub mod entities;
pub mod repositories;
