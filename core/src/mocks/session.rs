//! Mock session store for testing.

use crate::error::{PlatformError, Result};
use crate::providers::SessionStore;
use crate::state::{AuthSession, SessionToken};
use chrono::Duration;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock session store.
///
/// Uses in-memory storage for testing. Expiry is checked on read; there is
/// no TTL sweep.
#[derive(Debug, Clone, Default)]
pub struct MockSessionStore {
    sessions: Arc<Mutex<HashMap<SessionToken, AuthSession>>>,
}

impl MockSessionStore {
    /// Create a new mock session store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if the lock is poisoned.
    pub fn session_count(&self) -> Result<usize> {
        Ok(self
            .sessions
            .lock()
            .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?
            .len())
    }
}

impl SessionStore for MockSessionStore {
    fn put(
        &self,
        session: &AuthSession,
        _ttl: Duration,
    ) -> impl Future<Output = Result<()>> + Send {
        let sessions = Arc::clone(&self.sessions);
        let session = session.clone();

        async move {
            sessions
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?
                .insert(session.token, session);
            Ok(())
        }
    }

    fn get(
        &self,
        token: SessionToken,
    ) -> impl Future<Output = Result<Option<AuthSession>>> + Send {
        let sessions = Arc::clone(&self.sessions);

        async move {
            let guard = sessions
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?;

            Ok(guard
                .get(&token)
                .filter(|session| session.expires_at > chrono::Utc::now())
                .cloned())
        }
    }

    fn revoke(&self, token: SessionToken) -> impl Future<Output = Result<()>> + Send {
        let sessions = Arc::clone(&self.sessions);

        async move {
            sessions
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?
                .remove(&token);
            Ok(())
        }
    }
}
