//! Core domain entities.
//!
//! - [`UrlMapping`] - A persisted `(original_url, shortened_code, click_count)` triple

pub mod url_mapping;

pub use url_mapping::UrlMapping;
