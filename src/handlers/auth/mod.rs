//! Authentication handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{middleware, routing::post, Router};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Authentication routes; logout needs a live session
pub fn routes(state: AppState) -> Router<AppState> {
    let session_routes = Router::new()
        .route("/logout", post(handler::logout))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/signup", post(handler::signup))
        .route("/login", post(handler::login))
        .merge(session_routes)
}
