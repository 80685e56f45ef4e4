//! The entitlement engine.
//!
//! Computes, for any (viewer, plan) pair, whether the viewer may see full
//! plan content, and shapes plan responses accordingly. This is the single
//! source of truth for both questions: the catalog listing, single-plan
//! fetch, feed and trainer profile all call in here instead of re-deriving
//! access or selecting fields by hand.

use crate::error::Result;
use crate::providers::SubscriptionStore;
use crate::state::{Plan, PlanId, TrainerSummary, Viewer};
use crate::views::PlanView;
use chrono::Utc;
use std::collections::HashSet;

/// Entitlement computation over a subscription store.
#[derive(Clone)]
pub struct EntitlementEngine<S> {
    subscriptions: S,
}

impl<S> EntitlementEngine<S>
where
    S: SubscriptionStore,
{
    /// Create a new engine over the given store.
    pub const fn new(subscriptions: S) -> Self {
        Self { subscriptions }
    }

    /// Whether `viewer` may see the full content of `plan_id`.
    ///
    /// `false` for anonymous viewers. For authenticated viewers, `true` iff
    /// a live subscription exists for the pair. Role is irrelevant: a
    /// trainer viewing their own plan gets no bypass.
    ///
    /// # Errors
    ///
    /// Returns an error if the subscription read fails.
    pub async fn has_access(&self, viewer: &Viewer, plan_id: PlanId) -> Result<bool> {
        let Some(user_id) = viewer.user_id() else {
            return Ok(false);
        };

        let record = self.subscriptions.find(user_id, plan_id).await?;
        Ok(record.is_some_and(|sub| sub.is_live(Utc::now())))
    }

    /// The set of plan IDs `viewer` currently has access to.
    ///
    /// Batch form of [`has_access`](Self::has_access) for listing surfaces:
    /// one store read instead of one per plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the subscription read fails.
    pub async fn active_plan_ids(&self, viewer: &Viewer) -> Result<HashSet<PlanId>> {
        let Some(user_id) = viewer.user_id() else {
            return Ok(HashSet::new());
        };

        let now = Utc::now();
        let records = self.subscriptions.list_active_for_user(user_id).await?;
        Ok(records
            .into_iter()
            .filter(|sub| sub.is_live(now))
            .map(|sub| sub.plan_id)
            .collect())
    }

    /// Shape `plan` for `viewer`, computing access first.
    ///
    /// Surfaces that already hold a batched access set use
    /// [`PlanView::project`] directly with the looked-up flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the subscription read fails.
    pub async fn project(
        &self,
        viewer: &Viewer,
        plan: &Plan,
        trainer: Option<TrainerSummary>,
    ) -> Result<PlanView> {
        let has_access = self.has_access(viewer, plan.id).await?;
        Ok(PlanView::project(plan, trainer, has_access))
    }
}
