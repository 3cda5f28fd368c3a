//! Application layer services implementing business logic.
//!
//! Services coordinate the code generator and the mapping repository and give
//! HTTP handlers and the admin CLI a single entry point.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Shortening, resolution and listing

pub mod services;
