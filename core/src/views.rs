//! Viewer-facing projections of platform records.
//!
//! Field names are serialized in camelCase to preserve the platform's
//! public API shape.

use crate::state::{Plan, PlanId, SubscriptionId, SubscriptionStatus, TrainerSummary, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The viewer-specific shape of a plan.
///
/// Redaction is structural: the `Preview` variant does not carry
/// `description`, `duration` or `createdAt` at all, so serialization cannot
/// leak gated fields through empty-string or zero defaults.
///
/// Construction goes through [`PlanView::project`], the single source of
/// truth for response shaping. No surface selects plan fields by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanView {
    /// Full content, shown to entitled viewers.
    #[serde(rename_all = "camelCase")]
    Full {
        /// Plan ID.
        id: PlanId,
        /// Plan title.
        title: String,
        /// Gated description.
        description: String,
        /// Price.
        price: f64,
        /// Access window in days.
        #[serde(rename = "duration")]
        duration_days: i64,
        /// Authoring trainer, when the account still resolves.
        #[serde(skip_serializing_if = "Option::is_none")]
        trainer: Option<TrainerSummary>,
        /// Publication timestamp.
        created_at: DateTime<Utc>,
        /// Always `true` for this variant.
        has_access: bool,
    },

    /// Redacted preview, shown to everyone else.
    #[serde(rename_all = "camelCase")]
    Preview {
        /// Plan ID.
        id: PlanId,
        /// Plan title.
        title: String,
        /// Price.
        price: f64,
        /// Authoring trainer, when the account still resolves.
        #[serde(skip_serializing_if = "Option::is_none")]
        trainer: Option<TrainerSummary>,
        /// Always `false` for this variant.
        has_access: bool,
    },
}

impl PlanView {
    /// Shape `plan` for a viewer with the given access.
    #[must_use]
    pub fn project(plan: &Plan, trainer: Option<TrainerSummary>, has_access: bool) -> Self {
        if has_access {
            Self::Full {
                id: plan.id,
                title: plan.title.clone(),
                description: plan.description.clone(),
                price: plan.price,
                duration_days: plan.duration_days,
                trainer,
                created_at: plan.created_at,
                has_access: true,
            }
        } else {
            Self::Preview {
                id: plan.id,
                title: plan.title.clone(),
                price: plan.price,
                trainer,
                has_access: false,
            }
        }
    }

    /// The plan ID carried by either variant.
    #[must_use]
    pub const fn id(&self) -> PlanId {
        match self {
            Self::Full { id, .. } | Self::Preview { id, .. } => *id,
        }
    }

    /// Whether this is the full projection.
    #[must_use]
    pub const fn has_access(&self) -> bool {
        matches!(self, Self::Full { .. })
    }
}

/// The owner-side plan record returned from create/update.
///
/// Mutation surfaces are ownership-gated, not entitlement-gated, so this
/// carries the full record without an access flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    /// Plan ID.
    pub id: PlanId,
    /// Plan title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Price.
    pub price: f64,
    /// Access window in days.
    #[serde(rename = "duration")]
    pub duration_days: i64,
    /// Authoring trainer, when the account still resolves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainer: Option<TrainerSummary>,
    /// Publication timestamp.
    pub created_at: DateTime<Utc>,
}

impl PlanRecord {
    /// Build the owner-side record for `plan`.
    #[must_use]
    pub fn new(plan: &Plan, trainer: Option<TrainerSummary>) -> Self {
        Self {
            id: plan.id,
            title: plan.title.clone(),
            description: plan.description.clone(),
            price: plan.price,
            duration_days: plan.duration_days,
            trainer,
            created_at: plan.created_at,
        }
    }
}

/// A subscription with its plan populated, as listed on `my-subscriptions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionView {
    /// Subscription ID.
    pub id: SubscriptionId,
    /// Stored status.
    pub status: SubscriptionStatus,
    /// Latest purchase or reactivation timestamp.
    pub purchased_at: DateTime<Utc>,
    /// End of the access window.
    pub expires_at: DateTime<Utc>,
    /// The subscribed plan, projected full (the subscriber is entitled by
    /// definition). Omitted if the plan vanished mid-read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanView>,
}

/// One entry of a personalized feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    /// The projected plan.
    #[serde(flatten)]
    pub plan: PlanView,
    /// Whether the viewer holds a live subscription. Currently identical to
    /// the view's `hasAccess`; kept separate because future entitlement
    /// sources (e.g. trials) may diverge from subscription status.
    pub is_subscribed: bool,
}

/// Public trainer record, as listed on the trainer directory and profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerListing {
    /// Trainer account ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A trainer profile page: the trainer, their plans shaped for the viewer,
/// and whether the viewer follows them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerProfile {
    /// The trainer.
    pub trainer: TrainerListing,
    /// The trainer's plans, newest first, projected per viewer.
    pub plans: Vec<PlanView>,
    /// Whether the viewer follows this trainer. `false` for anonymous.
    pub is_following: bool,
}

/// One entry of a viewer's following list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowedTrainer {
    /// The followed trainer, when the account still resolves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainer: Option<TrainerSummary>,
    /// When the edge was created.
    pub followed_at: DateTime<Utc>,
}
