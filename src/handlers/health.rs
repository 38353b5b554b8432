//! Health check handlers

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Health check endpoint; reports degraded when the database is unreachable
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, database) = match state.users().ping().await {
        Ok(()) => ("healthy", "connected"),
        Err(e) => {
            warn!(error = %e, "Health check: database unreachable");
            ("degraded", "unreachable")
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
