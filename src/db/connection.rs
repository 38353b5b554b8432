//! Database connection management

use std::time::Duration;

use redis::aio::ConnectionManager;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    config::{DatabaseConfig, RedisConfig},
    constants::DATABASE_ACQUIRE_TIMEOUT_SECS,
};

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(DATABASE_ACQUIRE_TIMEOUT_SECS))
        .connect(&config.url)
        .await
}

/// Open a managed Redis connection for the session store
pub async fn create_redis(config: &RedisConfig) -> Result<ConnectionManager, redis::RedisError> {
    let client = redis::Client::open(config.url.as_str())?;
    ConnectionManager::new(client).await
}
