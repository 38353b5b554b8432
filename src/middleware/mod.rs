//! HTTP middleware: session resolution and request logging

pub mod auth;
pub mod logging;

pub use auth::{auth_middleware, require_admin, AuthenticatedUser};
pub use logging::logging_middleware;
