//! Storage layer
//!
//! PostgreSQL holds members and their ledger; Redis holds live sessions.

pub mod connection;
pub mod repositories;

use sqlx::PgPool;

pub use connection::{create_pool, create_redis};

/// Apply pending schema migrations from `migrations/`
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
