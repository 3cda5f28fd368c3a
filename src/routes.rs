//! Top-level router configuration combining page and public routes.
//!
//! # Route Structure
//!
//! - `GET  /`          - Link list and form
//! - `POST /`          - Shorten a URL
//! - `GET  /o/{code}`  - Short link redirect
//! - `GET  /health`    - Store connectivity
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use axum::Router;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(web::routes::routes())
        .merge(api::routes::public_routes())
        .with_state(state)
        .layer(tracing::layer())
}
