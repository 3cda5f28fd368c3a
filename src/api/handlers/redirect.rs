//! Handler for short URL resolution.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::validate_code;

/// Redirects a short code to its original URL and counts the visit.
///
/// # Endpoint
///
/// `GET /o/{code}`
///
/// The route captures the rest of the path, since standard base64 codes may
/// contain `/`.
///
/// # Response
///
/// `303 See Other` with the original URL in `Location`.
///
/// # Errors
///
/// Returns 404 Not Found if the code is malformed or unknown.
/// Returns 500 Internal Server Error if the store fails or times out.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if validate_code(&code).is_err() {
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        ));
    }

    let original_url = state.link_service.resolve(&code).await?;

    let location = HeaderValue::try_from(original_url.as_str()).map_err(|_| {
        AppError::internal(
            "Stored URL is not a valid redirect target",
            json!({ "code": code }),
        )
    })?;

    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response())
}
