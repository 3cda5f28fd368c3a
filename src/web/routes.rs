//! HTML route configuration.

use crate::state::AppState;
use crate::web::handlers::{home_handler, shorten_form_handler};
use axum::{Router, routing::get};

/// # Endpoints
///
/// - `GET  /` - Link list and shortening form
/// - `POST /` - Shorten the submitted URL
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(home_handler).post(shorten_form_handler))
}
