//! Request logging middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

/// Log one line per request, keyed by the matched route template
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| path.clone());

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    if response.status().is_server_error() {
        warn!(%method, %path, %route, status, %duration_ms, "Request failed");
    } else if response.status().is_client_error() {
        info!(%method, %path, %route, status, %duration_ms, "Request rejected");
    } else {
        info!(%method, %path, %route, status, %duration_ms, "Request completed");
    }

    response
}
