//! Core domain types for the platform.
//!
//! Everything here is `Clone` + `Serialize` so records can move freely
//! between stores, services and the web layer.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for an account (trainer or user).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub uuid::Uuid);

impl UserId {
    /// Generate a new random `UserId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanId(pub uuid::Uuid);

impl PlanId {
    /// Generate a new random `PlanId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for PlanId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a subscription record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub uuid::Uuid);

impl SubscriptionId {
    /// Generate a new random `SubscriptionId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque bearer credential handed out by the identity collaborator.
///
/// The platform never mints these itself; it only looks them up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(pub uuid::Uuid);

impl SessionToken {
    /// Generate a new random `SessionToken`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Accounts & Viewers
// ═══════════════════════════════════════════════════════════════════════

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Publishes plans; owns what it publishes.
    Trainer,
    /// Subscribes to plans and follows trainers.
    User,
}

impl Role {
    /// Stable string form, used for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trainer => "trainer",
            Self::User => "user",
        }
    }

    /// Parse the stored string form.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "trainer" => Some(Self::Trainer),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

/// An account record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Email address.
    pub email: String,

    /// Role of this account.
    pub role: Role,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// The identity a request is executing as.
///
/// Resolved exactly once per request by the identity resolver and threaded
/// through every core operation as an explicit parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    /// No (valid) credential was presented.
    Anonymous,
    /// A credential resolved to an account.
    Authenticated {
        /// Account ID.
        id: UserId,
        /// Role of the account.
        role: Role,
    },
}

impl Viewer {
    /// The viewer's account ID, if authenticated.
    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { id, .. } => Some(*id),
        }
    }

    /// Require an authenticated viewer of any role.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Unauthenticated`](crate::PlatformError::Unauthenticated)
    /// for anonymous viewers.
    pub const fn require_authenticated(&self) -> crate::Result<UserId> {
        match self {
            Self::Anonymous => Err(crate::PlatformError::Unauthenticated),
            Self::Authenticated { id, .. } => Ok(*id),
        }
    }

    /// Require an authenticated trainer.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` for anonymous viewers and `Forbidden` for
    /// authenticated non-trainers.
    pub fn require_trainer(&self) -> crate::Result<UserId> {
        match self {
            Self::Anonymous => Err(crate::PlatformError::Unauthenticated),
            Self::Authenticated {
                id,
                role: Role::Trainer,
            } => Ok(*id),
            Self::Authenticated { .. } => Err(crate::PlatformError::Forbidden(
                "Trainer role required".to_string(),
            )),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Plans
// ═══════════════════════════════════════════════════════════════════════

/// A priced content item published by a trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Plan ID.
    pub id: PlanId,

    /// Plan title.
    pub title: String,

    /// Full description. Gated content: only visible to entitled viewers.
    pub description: String,

    /// Price in the platform currency. Non-negative.
    pub price: f64,

    /// Access window granted by a subscription, in days. At least 1.
    pub duration_days: i64,

    /// The authoring trainer. Sole owner for mutation and deletion.
    pub trainer_id: UserId,

    /// Publication timestamp.
    pub created_at: DateTime<Utc>,
}

/// The public trainer projection embedded in plan views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerSummary {
    /// Trainer account ID.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Email address.
    pub email: String,
}

impl From<&Account> for TrainerSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Subscriptions
// ═══════════════════════════════════════════════════════════════════════

/// Stored subscription status.
///
/// Status is recorded, not derived: a record past its `expires_at` keeps
/// saying `Active` until a reactivation attempt observes it. Accessibility
/// checks therefore go through [`Subscription::is_live`], never through the
/// raw status alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// Entitlement granted (subject to `expires_at`).
    Active,
    /// Entitlement lapsed; the record is retained for reactivation.
    Expired,
}

impl SubscriptionStatus {
    /// Stable string form, used for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
        }
    }

    /// Parse the stored string form.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

/// An entitlement record for one (user, plan) pair.
///
/// Invariant: at most one record per pair. Re-subscribing reuses and
/// mutates the existing record rather than creating a duplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription ID. Stable across reactivations.
    pub id: SubscriptionId,

    /// Subscribing account.
    pub user_id: UserId,

    /// Target plan.
    pub plan_id: PlanId,

    /// Stored status.
    pub status: SubscriptionStatus,

    /// Timestamp of the latest purchase or reactivation.
    pub purchased_at: DateTime<Utc>,

    /// End of the access window, frozen at (re)activation time as
    /// `purchased_at + plan.duration_days`. Later plan-duration edits do
    /// not move it.
    pub expires_at: DateTime<Utc>,
}

impl Subscription {
    /// Whether this record grants access at `now`.
    ///
    /// The single accessibility predicate: stored status must be `Active`
    /// AND the access window must not have elapsed.
    #[must_use]
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Active && self.expires_at > now
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Follows
// ═══════════════════════════════════════════════════════════════════════

/// A (user, trainer) follow edge. Unique per pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    /// Following account.
    pub user_id: UserId,

    /// Followed trainer.
    pub trainer_id: UserId,

    /// Edge creation timestamp.
    pub followed_at: DateTime<Utc>,
}

// ═══════════════════════════════════════════════════════════════════════
// Sessions
// ═══════════════════════════════════════════════════════════════════════

/// An authenticated session, keyed by its opaque token.
///
/// Sessions are ephemeral (stored in Redis with a TTL) and reference a
/// durable account record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Opaque bearer token.
    pub token: SessionToken,

    /// Account the token belongs to.
    pub user_id: UserId,

    /// Session creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Session expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create a session for `user_id` valid for `ttl` from now.
    #[must_use]
    pub fn issue(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token: SessionToken::new(),
            user_id,
            created_at: now,
            expires_at: now + ttl,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn subscription(status: SubscriptionStatus, expires_in: Duration) -> Subscription {
        let now = Utc::now();
        Subscription {
            id: SubscriptionId::new(),
            user_id: UserId::new(),
            plan_id: PlanId::new(),
            status,
            purchased_at: now,
            expires_at: now + expires_in,
        }
    }

    #[test]
    fn active_within_window_is_live() {
        let sub = subscription(SubscriptionStatus::Active, Duration::days(30));
        assert!(sub.is_live(Utc::now()));
    }

    #[test]
    fn active_past_window_is_not_live() {
        let sub = subscription(SubscriptionStatus::Active, Duration::days(-1));
        assert!(!sub.is_live(Utc::now()));
    }

    #[test]
    fn expired_status_is_not_live() {
        let sub = subscription(SubscriptionStatus::Expired, Duration::days(30));
        assert!(!sub.is_live(Utc::now()));
    }

    #[test]
    fn anonymous_viewer_has_no_user_id() {
        assert_eq!(Viewer::Anonymous.user_id(), None);
        assert!(Viewer::Anonymous.require_authenticated().is_err());
    }

    #[test]
    fn trainer_requirement_rejects_users() {
        let viewer = Viewer::Authenticated {
            id: UserId::new(),
            role: Role::User,
        };
        assert!(viewer.require_authenticated().is_ok());
        assert!(matches!(
            viewer.require_trainer(),
            Err(crate::PlatformError::Forbidden(_))
        ));
    }

    #[test]
    fn role_round_trips_through_storage_form() {
        assert_eq!(Role::parse(Role::Trainer.as_str()), Some(Role::Trainer));
        assert_eq!(Role::parse("admin"), None);
    }
}
