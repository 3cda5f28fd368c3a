//! Public routes for resolution and health.

use crate::api::handlers::{health_handler, redirect_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// # Endpoints
///
/// - `GET /o/{code}` - Resolve a short code (303 See Other)
/// - `GET /health`   - Store connectivity check
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/o/{*code}", get(redirect_handler))
        .route("/health", get(health_handler))
}
