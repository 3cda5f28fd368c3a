//! HTTP request/response tracing middleware.

use axum::body::Body;
use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

/// Trace layer type produced by [`layer`].
pub type HttpTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    fn(&Request<Body>) -> Span,
    DefaultOnRequest,
    DefaultOnResponse,
>;

/// Creates the request tracing layer.
///
/// Every request gets an `INFO` span carrying the method, the path and the
/// kind of route it hit, so redirects can be filtered apart from page loads.
/// The response is logged at `INFO` with status and latency in milliseconds.
///
/// ```text
/// INFO request{method=GET path=/o/dZKKhLUIf route=redirect}: finished processing request latency=3 ms status=303
/// ```
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(request_span as fn(&Request<Body>) -> Span)
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}

fn request_span(request: &Request<Body>) -> Span {
    let path = request.uri().path();
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %path,
        route = route_kind(path),
    )
}

fn route_kind(path: &str) -> &'static str {
    match path {
        "/" => "home",
        "/health" => "health",
        p if p.starts_with("/o/") => "redirect",
        _ => "other",
    }
}
