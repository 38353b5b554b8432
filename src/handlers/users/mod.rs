//! Member profile handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// User routes (session required)
pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(handler::get_me))
}
