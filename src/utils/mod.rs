//! Helper functions shared across layers.
//!
//! - [`code_generator`] - Short code generation and shape checks
//! - [`url_verifier`] - URL verification before shortening
//! - [`number_format`] - Click counter formatting for display
//! - [`db_error`] - Driver error classification

pub mod code_generator;
pub mod db_error;
pub mod number_format;
pub mod url_verifier;
