//! Database repositories
//!
//! Repositories handle all direct storage interactions.

pub mod session_repo;
pub mod user_repo;

pub use session_repo::{RedisSessionStore, SessionStore};
pub use user_repo::{PgUserRepository, UserRepository};
