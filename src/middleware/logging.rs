//! Request logging middleware

use std::time::Instant;

use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use tracing::{info, warn};

use super::auth::AuthenticatedUser;

/// Log one line per request with status, latency and, when known, the member
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = start.elapsed().as_millis() as u64;
    let user_id = response
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|u| u.id.to_string())
        .unwrap_or_default();

    match status {
        s if s.is_server_error() => warn!(
            %method, %path, status = s.as_u16(), latency_ms, %user_id,
            "Request failed"
        ),
        s if s.is_client_error() && s != StatusCode::NOT_FOUND => warn!(
            %method, %path, status = s.as_u16(), latency_ms, %user_id,
            "Request rejected"
        ),
        s => info!(
            %method, %path, status = s.as_u16(), latency_ms, %user_id,
            "Request completed"
        ),
    }

    response
}
