//! Mapping entity: one row per shortened link.

use serde::Serialize;

/// A shortened link.
///
/// `shortened_code` is unique across all rows. `click_count` starts at zero and
/// only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct UrlMapping {
    pub original_url: String,
    #[sqlx(rename = "shortened_url")]
    pub shortened_code: String,
    #[sqlx(rename = "clicks")]
    pub click_count: i64,
}

impl UrlMapping {
    pub fn new(original_url: String, shortened_code: String, click_count: i64) -> Self {
        Self {
            original_url,
            shortened_code,
            click_count,
        }
    }

    /// Full public URL for this mapping under `base_url` (e.g. `http://host/`).
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/o/{}", base_url.trim_end_matches('/'), self.shortened_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_creation() {
        let mapping = UrlMapping::new(
            "https://example.com".to_string(),
            "abc123XYZ".to_string(),
            0,
        );

        assert_eq!(mapping.original_url, "https://example.com");
        assert_eq!(mapping.shortened_code, "abc123XYZ");
        assert_eq!(mapping.click_count, 0);
    }

    #[test]
    fn test_short_url() {
        let mapping = UrlMapping::new("https://example.com".to_string(), "abc+23/XY".to_string(), 3);

        assert_eq!(mapping.short_url("http://localhost:8080/"), "http://localhost:8080/o/abc+23/XY");
        assert_eq!(mapping.short_url("http://localhost:8080"), "http://localhost:8080/o/abc+23/XY");
    }
}
