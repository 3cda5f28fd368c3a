//! Home page: link list and shortening form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::Redirect,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::entities::UrlMapping;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::number_format::format_clicks;
use crate::utils::url_verifier::UrlVerificationError;

const EMPTY_URL_MESSAGE: &str = "URL cannot be empty";
const INVALID_URL_MESSAGE: &str = "Sorry! I can only shorten valid URLs.";
const UNREACHABLE_URL_MESSAGE: &str = "Sorry! The URL was not reachable.";
const SHORTEN_FAILED_MESSAGE: &str = "Error shortening URL";

/// Template for the home page.
///
/// Renders `templates/index.html` with the shortening form, an optional error
/// banner and every mapping with its click count.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub base_url: String,
    pub error: Option<String>,
    pub rows: Vec<MappingRow>,
}

/// One table row, pre-formatted for display.
pub struct MappingRow {
    pub original_url: String,
    pub short_url: String,
    pub clicks: String,
}

impl MappingRow {
    fn from_mapping(mapping: &UrlMapping, base_url: &str) -> Self {
        Self {
            original_url: mapping.original_url.clone(),
            short_url: mapping.short_url(base_url),
            clicks: format_clicks(mapping.click_count),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    #[serde(default)]
    pub url: String,
}

/// Renders the home page.
///
/// # Endpoint
///
/// `GET /`
///
/// Short URLs are built from the request `Host` header. An error message
/// from a failed submission arrives in the `error` query parameter.
///
/// # Errors
///
/// Returns 500 Internal Server Error if the mappings cannot be listed.
pub async fn home_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HomeQuery>,
) -> Result<HomeTemplate, AppError> {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let base_url = format!("http://{}/", host);

    let mappings = state.link_service.list_recent().await?;
    let rows = mappings
        .iter()
        .map(|m| MappingRow::from_mapping(m, &base_url))
        .collect();

    Ok(HomeTemplate {
        base_url,
        error: query.error.filter(|e| !e.is_empty()),
        rows,
    })
}

/// Shortens the submitted URL and returns to the home page.
///
/// # Endpoint
///
/// `POST /` (form field `url`)
///
/// Always answers `303 See Other`. Failures are reported through the `error`
/// query parameter of the redirect target.
pub async fn shorten_form_handler(
    State(state): State<AppState>,
    Form(form): Form<ShortenForm>,
) -> Redirect {
    let url = form.url.trim();

    if url.is_empty() {
        return redirect_with_error(EMPTY_URL_MESSAGE);
    }

    let verified = match state.verifier.verify(url).await {
        Ok(verified) => verified,
        Err(UrlVerificationError::Unreachable(reason)) => {
            warn!("[{}] was not reachable: {}", url, reason);
            return redirect_with_error(UNREACHABLE_URL_MESSAGE);
        }
        Err(e) => {
            warn!("[{}] is not a valid URL: {}", url, e);
            return redirect_with_error(INVALID_URL_MESSAGE);
        }
    };

    match state.link_service.shorten(&verified).await {
        Ok(mapping) => {
            info!(
                "Redirecting [{}] to [{}]",
                mapping.original_url, mapping.shortened_code
            );
            Redirect::to("/")
        }
        Err(e) => {
            error!("Failed to shorten [{}]: {}", url, e);
            redirect_with_error(SHORTEN_FAILED_MESSAGE)
        }
    }
}

fn redirect_with_error(message: &str) -> Redirect {
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    Redirect::to(&format!("/?error={}", encoded))
}
