//! Identity resolution.
//!
//! Turns an optional opaque bearer credential into a [`Viewer`], exactly
//! once per request. Every downstream operation takes the resolved viewer
//! as an explicit parameter; nothing re-derives identity mid-pipeline.

use crate::providers::{AccountStore, SessionStore};
use crate::state::{SessionToken, Viewer};

/// Resolves bearer credentials to viewers.
///
/// Invalid, expired or malformed credentials resolve to
/// [`Viewer::Anonymous`], never to an error: several read surfaces
/// intentionally serve anonymous viewers with a reduced projection, so a
/// missing identity is a valid state, not a failure. Store errors during
/// resolution are logged and swallowed the same way.
#[derive(Clone)]
pub struct IdentityResolver<S, A> {
    sessions: S,
    accounts: A,
}

impl<S, A> IdentityResolver<S, A>
where
    S: SessionStore,
    A: AccountStore,
{
    /// Create a new resolver over the given stores.
    pub const fn new(sessions: S, accounts: A) -> Self {
        Self { sessions, accounts }
    }

    /// Resolve an optional bearer credential to a viewer.
    pub async fn resolve(&self, bearer: Option<&str>) -> Viewer {
        let Some(raw) = bearer else {
            return Viewer::Anonymous;
        };

        let Ok(token) = uuid::Uuid::parse_str(raw.trim()) else {
            tracing::debug!("Bearer credential is not a valid token; treating as anonymous");
            return Viewer::Anonymous;
        };

        let session = match self.sessions.get(SessionToken(token)).await {
            Ok(Some(session)) => session,
            Ok(None) => return Viewer::Anonymous,
            Err(error) => {
                tracing::debug!(%error, "Session lookup failed; treating as anonymous");
                return Viewer::Anonymous;
            }
        };

        match self.accounts.get(session.user_id).await {
            Ok(Some(account)) => Viewer::Authenticated {
                id: account.id,
                role: account.role,
            },
            Ok(None) => {
                tracing::debug!(
                    user_id = %session.user_id.0,
                    "Session references a missing account; treating as anonymous"
                );
                Viewer::Anonymous
            }
            Err(error) => {
                tracing::debug!(%error, "Account lookup failed; treating as anonymous");
                Viewer::Anonymous
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mocks::{MockAccountStore, MockSessionStore};
    use crate::providers::SessionStore as _;
    use crate::state::{Account, AuthSession, Role, UserId};
    use chrono::{Duration, Utc};

    fn account(role: Role) -> Account {
        Account {
            id: UserId::new(),
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    fn resolver() -> (
        IdentityResolver<MockSessionStore, MockAccountStore>,
        MockSessionStore,
        MockAccountStore,
    ) {
        let sessions = MockSessionStore::new();
        let accounts = MockAccountStore::new();
        (
            IdentityResolver::new(sessions.clone(), accounts.clone()),
            sessions,
            accounts,
        )
    }

    #[tokio::test]
    async fn absent_credential_is_anonymous() {
        let (resolver, _, _) = resolver();
        assert_eq!(resolver.resolve(None).await, Viewer::Anonymous);
    }

    #[tokio::test]
    async fn malformed_credential_is_anonymous() {
        let (resolver, _, _) = resolver();
        assert_eq!(
            resolver.resolve(Some("not-a-token")).await,
            Viewer::Anonymous
        );
    }

    #[tokio::test]
    async fn unknown_credential_is_anonymous() {
        let (resolver, _, _) = resolver();
        let token = uuid::Uuid::new_v4().to_string();
        assert_eq!(resolver.resolve(Some(&token)).await, Viewer::Anonymous);
    }

    #[tokio::test]
    async fn expired_session_is_anonymous() {
        let (resolver, sessions, accounts) = resolver();
        let account = account(Role::User);
        accounts.seed(account.clone()).unwrap();

        let mut session = AuthSession::issue(account.id, Duration::hours(24));
        session.expires_at = Utc::now() - Duration::seconds(5);
        sessions.put(&session, Duration::hours(24)).await.unwrap();

        let viewer = resolver.resolve(Some(&session.token.0.to_string())).await;
        assert_eq!(viewer, Viewer::Anonymous);
    }

    #[tokio::test]
    async fn session_without_account_is_anonymous() {
        let (resolver, sessions, _) = resolver();
        let session = AuthSession::issue(UserId::new(), Duration::hours(24));
        sessions.put(&session, Duration::hours(24)).await.unwrap();

        let viewer = resolver.resolve(Some(&session.token.0.to_string())).await;
        assert_eq!(viewer, Viewer::Anonymous);
    }

    #[tokio::test]
    async fn valid_credential_resolves_role() {
        let (resolver, sessions, accounts) = resolver();
        let account = account(Role::Trainer);
        accounts.seed(account.clone()).unwrap();

        let session = AuthSession::issue(account.id, Duration::hours(24));
        sessions.put(&session, Duration::hours(24)).await.unwrap();

        let viewer = resolver.resolve(Some(&session.token.0.to_string())).await;
        assert_eq!(
            viewer,
            Viewer::Authenticated {
                id: account.id,
                role: Role::Trainer,
            }
        );
    }
}
