//! Session repository
//!
//! Every issued token carries a random session id. The id is only honoured
//! while its record exists here, which makes tokens revocable before expiry.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    utils::crypto::sha256_hex,
};

/// Server-side record of live sessions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Register a new session for `ttl_seconds`
    async fn create(&self, session_id: &str, user_id: Uuid, ttl_seconds: i64) -> AppResult<()>;

    /// Whether the session is still live
    async fn is_active(&self, session_id: &str) -> AppResult<bool>;

    /// Revoke a single session
    async fn revoke(&self, session_id: &str) -> AppResult<()>;

    /// Revoke every session belonging to a user
    async fn revoke_all(&self, user_id: Uuid) -> AppResult<()>;
}

/// Redis implementation of [`SessionStore`]
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
}

impl RedisSessionStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    // Raw session ids never reach Redis
    fn session_key(session_id: &str) -> String {
        format!("session:{}", sha256_hex(session_id))
    }

    fn user_sessions_key(user_id: Uuid) -> String {
        format!("user_sessions:{}", user_id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, session_id: &str, user_id: Uuid, ttl_seconds: i64) -> AppResult<()> {
        let ttl = u64::try_from(ttl_seconds)
            .ok()
            .filter(|ttl| *ttl > 0)
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!("Session TTL must be positive, got {}", ttl_seconds))
            })?;

        let mut conn = self.conn.clone();
        let key = Self::session_key(session_id);
        let index = Self::user_sessions_key(user_id);

        conn.set_ex::<_, _, ()>(&key, user_id.to_string(), ttl).await?;
        conn.sadd::<_, _, ()>(&index, &key).await?;
        conn.expire::<_, ()>(&index, ttl_seconds).await?;

        Ok(())
    }

    async fn is_active(&self, session_id: &str) -> AppResult<bool> {
        let mut conn = self.conn.clone();
        let exists: bool = conn.exists(Self::session_key(session_id)).await?;
        Ok(exists)
    }

    async fn revoke(&self, session_id: &str) -> AppResult<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(Self::session_key(session_id)).await?;
        Ok(())
    }

    async fn revoke_all(&self, user_id: Uuid) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let index = Self::user_sessions_key(user_id);

        let keys: Vec<String> = conn.smembers(&index).await?;
        for key in keys {
            conn.del::<_, ()>(&key).await?;
        }
        conn.del::<_, ()>(&index).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_hides_raw_id() {
        let key = RedisSessionStore::session_key("raw-session-id");
        assert!(key.starts_with("session:"));
        assert!(!key.contains("raw-session-id"));
        assert_eq!(key, RedisSessionStore::session_key("raw-session-id"));
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_revoke_all_only_touches_one_user() {
        let store = crate::test_utils::containers::session_store().await;
        let (asha, ravi) = (Uuid::new_v4(), Uuid::new_v4());
        let (a1, a2, r1) = (
            format!("a1-{}", asha),
            format!("a2-{}", asha),
            format!("r1-{}", ravi),
        );

        store.create(&a1, asha, 60).await.unwrap();
        store.create(&a2, asha, 60).await.unwrap();
        store.create(&r1, ravi, 60).await.unwrap();
        assert!(store.is_active(&a1).await.unwrap());

        store.revoke_all(asha).await.unwrap();

        assert!(!store.is_active(&a1).await.unwrap());
        assert!(!store.is_active(&a2).await.unwrap());
        assert!(store.is_active(&r1).await.unwrap());

        store.revoke(&r1).await.unwrap();
        assert!(!store.is_active(&r1).await.unwrap());
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_create_rejects_non_positive_ttl() {
        let store = crate::test_utils::containers::session_store().await;
        let user_id = Uuid::new_v4();

        for ttl in [0, -60] {
            let result = store.create(&format!("s-{}-{}", ttl, user_id), user_id, ttl).await;
            assert!(matches!(result, Err(AppError::Internal(_))), "ttl = {}", ttl);
        }
    }
}
