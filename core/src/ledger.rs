//! The subscription ledger.
//!
//! Owns the lifecycle of (user, plan) entitlement records: creation,
//! reactivation and lazy expiry. There is no background sweep; a lapsed
//! record is only rewritten when a re-subscribe observes it.

use crate::error::{PlatformError, Result};
use crate::providers::{account, AccountStore, ActivationOutcome, PlanStore, SubscriptionStore};
use crate::state::{Plan, PlanId, Subscription, UserId};
use crate::views::{PlanView, SubscriptionView};
use chrono::{Duration, Utc};

/// Result of a subscribe call.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscribeOutcome {
    /// First subscription for the pair.
    Created(SubscriptionView),
    /// An existing lapsed record was reactivated in place.
    Reactivated(SubscriptionView),
}

impl SubscribeOutcome {
    /// The resulting record, either way.
    #[must_use]
    pub const fn view(&self) -> &SubscriptionView {
        match self {
            Self::Created(view) | Self::Reactivated(view) => view,
        }
    }

    /// Whether a new record was created.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Subscription lifecycle over plan, subscription and account stores.
#[derive(Clone)]
pub struct SubscriptionLedger<P, S, A> {
    plans: P,
    subscriptions: S,
    accounts: A,
}

impl<P, S, A> SubscriptionLedger<P, S, A>
where
    P: PlanStore,
    S: SubscriptionStore,
    A: AccountStore,
{
    /// Create a new ledger over the given stores.
    pub const fn new(plans: P, subscriptions: S, accounts: A) -> Self {
        Self {
            plans,
            subscriptions,
            accounts,
        }
    }

    /// Subscribe `user_id` to `plan_id`.
    ///
    /// The access window is `plan.duration_days` from now, frozen on the
    /// record; later plan edits do not move existing windows. The create-
    /// or-reactivate decision happens inside the store's single conditional
    /// write, so concurrent calls for the same pair cannot create
    /// duplicates. A record flagged active but past its window counts as
    /// lapsed and takes the reactivation path.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the plan does not exist
    /// - `Conflict` if a live subscription already exists for the pair
    /// - `Storage` if a store operation fails
    pub async fn subscribe(&self, user_id: UserId, plan_id: PlanId) -> Result<SubscribeOutcome> {
        let plan = self
            .plans
            .get(plan_id)
            .await?
            .ok_or(PlatformError::not_found("Plan"))?;

        let now = Utc::now();
        let expires_at = now + Duration::days(plan.duration_days);

        match self
            .subscriptions
            .activate(user_id, plan_id, now, expires_at)
            .await?
        {
            ActivationOutcome::AlreadyActive => Err(PlatformError::Conflict(
                "Already subscribed to this plan".to_string(),
            )),
            ActivationOutcome::Created(record) => {
                tracing::info!(
                    user_id = %user_id.0,
                    plan_id = %plan_id.0,
                    expires_at = %record.expires_at,
                    "Subscription created"
                );
                Ok(SubscribeOutcome::Created(
                    self.view_of(record, Some(plan)).await?,
                ))
            }
            ActivationOutcome::Reactivated(record) => {
                tracing::info!(
                    user_id = %user_id.0,
                    plan_id = %plan_id.0,
                    expires_at = %record.expires_at,
                    "Subscription reactivated"
                );
                Ok(SubscribeOutcome::Reactivated(
                    self.view_of(record, Some(plan)).await?,
                ))
            }
        }
    }

    /// The viewer's live subscriptions, most recent purchase first, each
    /// with its plan populated and projected full (holding a live
    /// subscription IS the entitlement).
    ///
    /// # Errors
    ///
    /// Returns an error if a store read fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<SubscriptionView>> {
        let now = Utc::now();
        let records = self.subscriptions.list_active_for_user(user_id).await?;

        let mut views = Vec::with_capacity(records.len());
        for record in records {
            if !record.is_live(now) {
                continue;
            }
            let plan = self.plans.get(record.plan_id).await?;
            views.push(self.view_of(record, plan).await?);
        }
        Ok(views)
    }

    /// Whether `user_id` holds a live subscription for `plan_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub async fn is_active(&self, user_id: UserId, plan_id: PlanId) -> Result<bool> {
        let record = self.subscriptions.find(user_id, plan_id).await?;
        Ok(record.is_some_and(|sub| sub.is_live(Utc::now())))
    }

    /// Build the populated view for a record. A vanished plan degrades to
    /// an omitted `plan` field rather than an error.
    async fn view_of(
        &self,
        record: Subscription,
        plan: Option<Plan>,
    ) -> Result<SubscriptionView> {
        let plan_view = match plan {
            Some(plan) => {
                let trainers =
                    account::trainer_summaries(&self.accounts, [plan.trainer_id]).await?;
                let trainer = trainers.get(&plan.trainer_id).cloned();
                Some(PlanView::project(&plan, trainer, true))
            }
            None => None,
        };

        Ok(SubscriptionView {
            id: record.id,
            status: record.status,
            purchased_at: record.purchased_at,
            expires_at: record.expires_at,
            plan: plan_view,
        })
    }
}
