//! Admin management handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

/// Admin routes (admin session required)
pub fn routes() -> Router<AppState> {
    Router::new()
        // Member management
        .route("/users", get(handler::list_users))
        .route("/users/{id}", get(handler::get_user))
        .route("/users/{id}/role", put(handler::update_user_role))
        // Ledger
        .route("/points", post(handler::adjust_points))
}
