//! Session store trait.

use crate::error::Result;
use crate::state::{AuthSession, SessionToken};
use chrono::Duration;
use std::future::Future;

/// Session storage.
///
/// Sessions are ephemeral: the store expires them on its own (TTL) and a
/// lookup past `expires_at` returns `None` regardless.
pub trait SessionStore: Send + Sync {
    /// Store a session under its token.
    ///
    /// # Arguments
    ///
    /// - `session`: the session to store
    /// - `ttl`: time to live
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn put(
        &self,
        session: &AuthSession,
        ttl: Duration,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Look up a session by token.
    ///
    /// # Returns
    ///
    /// The session if present and not expired; `None` otherwise. Expiry is
    /// never an error here; callers downgrade to anonymous.
    ///
    /// # Errors
    ///
    /// Returns an error only if the read itself fails.
    fn get(
        &self,
        token: SessionToken,
    ) -> impl Future<Output = Result<Option<AuthSession>>> + Send;

    /// Remove a session. Removing an absent token is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn revoke(&self, token: SessionToken) -> impl Future<Output = Result<()>> + Send;
}
