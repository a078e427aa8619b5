use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info_span, Instrument};
use uuid::Uuid;

/// Wraps every request in a span carrying the route pattern and a fresh
/// request id, then logs the outcome with its latency.
pub async fn request_log_middleware(
    matched_path: Option<MatchedPath>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let route = matched_path
        .as_ref()
        .map(MatchedPath::as_str)
        .unwrap_or(uri.path())
        .to_string();
    let start_time = Instant::now();

    let span = info_span!(
        "http_request",
        method = %method,
        uri = %uri,
        route = %route,
        request_id = %Uuid::now_v7(),
    );

    let response = next.run(request).instrument(span).await;

    let latency_ms = start_time.elapsed().as_millis() as u64;
    let status = response.status();
    if status.is_server_error() {
        tracing::error!(%method, route, %status, latency_ms, "request failed");
    } else {
        tracing::info!(%method, route, %status, latency_ms, "request completed");
    }

    response
}
