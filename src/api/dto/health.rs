//! Body of the health check endpoint.

use serde::Serialize;

/// Overall service health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store: StoreCheck,
}

impl HealthResponse {
    pub fn new(store: StoreCheck) -> Self {
        Self {
            status: if store.is_ok() { "healthy" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            store,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.store.is_ok()
    }
}

/// Result of pinging the mapping store.
#[derive(Debug, Serialize)]
pub struct StoreCheck {
    pub status: &'static str,
    pub latency_ms: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StoreCheck {
    pub fn ok(latency_ms: u64) -> Self {
        Self {
            status: "ok",
            latency_ms,
            message: None,
        }
    }

    pub fn failed(latency_ms: u64, message: impl Into<String>) -> Self {
        Self {
            status: "error",
            latency_ms,
            message: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.message.is_none()
    }
}
