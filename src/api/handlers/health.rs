//! Handler for the health check endpoint.

use std::time::Instant;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::health::{HealthResponse, StoreCheck};
use crate::state::AppState;

/// Reports whether the mapping store answers.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Store reachable
/// - **503 Service Unavailable**: Store unreachable or timed out
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "store": { "status": "ok", "latency_ms": 1 }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let result = state.link_service.health().await;
    let latency_ms = started.elapsed().as_millis() as u64;

    let store = match result {
        Ok(()) => StoreCheck::ok(latency_ms),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            StoreCheck::failed(latency_ms, e.to_string())
        }
    };

    let response = HealthResponse::new(store);
    let status = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response)).into_response()
}
