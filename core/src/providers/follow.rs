//! Follow store trait.

use crate::error::Result;
use crate::state::{Follow, UserId};
use std::future::Future;

/// Follow-edge storage.
///
/// Edge uniqueness per (user, trainer) pair is enforced by the store.
pub trait FollowStore: Send + Sync {
    /// Insert a follow edge.
    ///
    /// # Returns
    ///
    /// `true` if the edge was inserted, `false` if it already existed
    /// (detected by the store's uniqueness constraint, not a pre-check).
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn insert(&self, follow: &Follow) -> impl Future<Output = Result<bool>> + Send;

    /// Remove a follow edge.
    ///
    /// # Returns
    ///
    /// `true` if an edge was removed, `false` if none existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete(
        &self,
        user_id: UserId,
        trainer_id: UserId,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Whether the edge exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn exists(
        &self,
        user_id: UserId,
        trainer_id: UserId,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// All edges created by `user_id`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn list_for_user(&self, user_id: UserId) -> impl Future<Output = Result<Vec<Follow>>> + Send;
}
