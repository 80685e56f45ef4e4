//! Mock follow store for testing.

use crate::error::{PlatformError, Result};
use crate::providers::FollowStore;
use crate::state::{Follow, UserId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock follow store.
///
/// Keyed by (user, trainer), so edge uniqueness holds by construction.
#[derive(Debug, Clone, Default)]
pub struct MockFollowStore {
    follows: Arc<Mutex<HashMap<(UserId, UserId), Follow>>>,
}

impl MockFollowStore {
    /// Create a new mock follow store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored edges (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if the lock is poisoned.
    pub fn follow_count(&self) -> Result<usize> {
        Ok(self
            .follows
            .lock()
            .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?
            .len())
    }
}

impl FollowStore for MockFollowStore {
    fn insert(&self, follow: &Follow) -> impl Future<Output = Result<bool>> + Send {
        let follows = Arc::clone(&self.follows);
        let follow = follow.clone();

        async move {
            let mut guard = follows
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?;

            let key = (follow.user_id, follow.trainer_id);
            if guard.contains_key(&key) {
                return Ok(false);
            }

            guard.insert(key, follow);
            Ok(true)
        }
    }

    fn delete(
        &self,
        user_id: UserId,
        trainer_id: UserId,
    ) -> impl Future<Output = Result<bool>> + Send {
        let follows = Arc::clone(&self.follows);

        async move {
            Ok(follows
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?
                .remove(&(user_id, trainer_id))
                .is_some())
        }
    }

    fn exists(
        &self,
        user_id: UserId,
        trainer_id: UserId,
    ) -> impl Future<Output = Result<bool>> + Send {
        let follows = Arc::clone(&self.follows);

        async move {
            Ok(follows
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?
                .contains_key(&(user_id, trainer_id)))
        }
    }

    fn list_for_user(&self, user_id: UserId) -> impl Future<Output = Result<Vec<Follow>>> + Send {
        let follows = Arc::clone(&self.follows);

        async move {
            let guard = follows
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?;

            let mut edges: Vec<Follow> = guard
                .values()
                .filter(|follow| follow.user_id == user_id)
                .cloned()
                .collect();
            edges.sort_by(|a, b| b.followed_at.cmp(&a.followed_at));
            Ok(edges)
        }
    }
}
