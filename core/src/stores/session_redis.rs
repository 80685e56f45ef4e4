//! Redis-based session store implementation.
//!
//! Sessions are stored under `session:{token}` as bincode-serialized
//! [`AuthSession`] values with a TTL. Expiry is validated again on read:
//! Redis TTL handles the common case, but clock skew or a manually
//! persisted key must not resurrect a dead session.

use crate::error::{PlatformError, Result};
use crate::providers::SessionStore;
use crate::state::{AuthSession, SessionToken};
use chrono::Duration;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

/// Redis-based session store with TTL-based expiration.
#[derive(Clone)]
pub struct RedisSessionStore {
    /// Connection manager for connection pooling.
    conn_manager: ConnectionManager,
}

impl RedisSessionStore {
    /// Create a new Redis session store.
    ///
    /// # Arguments
    ///
    /// * `redis_url` - Redis connection URL (e.g., "redis://127.0.0.1:6379")
    ///
    /// # Errors
    ///
    /// Returns error if connection to Redis fails.
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            PlatformError::Storage(format!("Failed to create Redis client: {e}"))
        })?;

        let conn_manager = ConnectionManager::new(client).await.map_err(|e| {
            PlatformError::Storage(format!("Failed to create Redis connection manager: {e}"))
        })?;

        Ok(Self { conn_manager })
    }

    /// The Redis key for a session.
    fn session_key(token: SessionToken) -> String {
        format!("session:{}", token.0)
    }
}

impl SessionStore for RedisSessionStore {
    async fn put(&self, session: &AuthSession, ttl: Duration) -> Result<()> {
        let mut conn = self.conn_manager.clone();
        let key = Self::session_key(session.token);

        let payload = bincode::serialize(session)
            .map_err(|e| PlatformError::Storage(format!("Failed to serialize session: {e}")))?;

        #[allow(clippy::cast_sign_loss)]
        let ttl_seconds = ttl.num_seconds().max(0) as u64;

        let _: () = conn
            .set_ex(&key, payload, ttl_seconds)
            .await
            .map_err(|e| PlatformError::Storage(format!("Failed to store session: {e}")))?;

        tracing::debug!(
            token = %session.token.0,
            user_id = %session.user_id.0,
            ttl_seconds,
            "Stored session in Redis"
        );

        Ok(())
    }

    async fn get(&self, token: SessionToken) -> Result<Option<AuthSession>> {
        let mut conn = self.conn_manager.clone();
        let key = Self::session_key(token);

        let payload: Option<Vec<u8>> = conn
            .get(&key)
            .await
            .map_err(|e| PlatformError::Storage(format!("Failed to read session: {e}")))?;

        let Some(bytes) = payload else {
            return Ok(None);
        };

        let session: AuthSession = bincode::deserialize(&bytes)
            .map_err(|e| PlatformError::Storage(format!("Failed to deserialize session: {e}")))?;

        if session.expires_at < chrono::Utc::now() {
            tracing::debug!(
                token = %token.0,
                expires_at = %session.expires_at,
                "Session outlived its expiry in Redis; dropping it"
            );
            let _: () = conn
                .del(&key)
                .await
                .map_err(|e| PlatformError::Storage(format!("Failed to delete session: {e}")))?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    async fn revoke(&self, token: SessionToken) -> Result<()> {
        let mut conn = self.conn_manager.clone();
        let key = Self::session_key(token);

        let _: () = conn
            .del(&key)
            .await
            .map_err(|e| PlatformError::Storage(format!("Failed to delete session: {e}")))?;

        tracing::debug!(token = %token.0, "Revoked session");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::providers::SessionStore as _;
    use crate::state::UserId;
    use chrono::Utc;

    // These tests require a running Redis instance:
    // docker run -d -p 6379:6379 redis:7-alpine

    #[tokio::test]
    #[ignore] // Requires Redis running
    async fn session_round_trip() {
        let store = RedisSessionStore::new("redis://127.0.0.1:6379")
            .await
            .unwrap();

        let session = AuthSession::issue(UserId::new(), Duration::hours(24));
        store.put(&session, Duration::hours(24)).await.unwrap();

        let retrieved = store.get(session.token).await.unwrap().unwrap();
        assert_eq!(retrieved.user_id, session.user_id);

        store.revoke(session.token).await.unwrap();
        assert!(store.get(session.token).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore] // Requires Redis running
    async fn expired_session_reads_as_absent() {
        let store = RedisSessionStore::new("redis://127.0.0.1:6379")
            .await
            .unwrap();

        let mut session = AuthSession::issue(UserId::new(), Duration::hours(1));
        session.expires_at = Utc::now() - Duration::seconds(10);

        // Redis TTL would eventually delete it; the read-side check must
        // not wait for that.
        store.put(&session, Duration::seconds(60)).await.unwrap();
        assert!(store.get(session.token).await.unwrap().is_none());

        let _ = store.revoke(session.token).await;
    }
}
