//! Subscription store trait.

use crate::error::Result;
use crate::state::{PlanId, Subscription, UserId};
use chrono::{DateTime, Utc};
use std::future::Future;

/// Result of an [`SubscriptionStore::activate`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivationOutcome {
    /// No record existed for the pair; one was created.
    Created(Subscription),
    /// A lapsed record existed; it was reactivated in place, keeping its ID.
    Reactivated(Subscription),
    /// A live record already exists; nothing was written.
    AlreadyActive,
}

/// Subscription storage.
///
/// The store owns the "at most one record per (user, plan)" invariant and
/// must enforce it with a uniqueness constraint, not a pre-check.
pub trait SubscriptionStore: Send + Sync {
    /// Fetch the record for a (user, plan) pair, live or lapsed.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn find(
        &self,
        user_id: UserId,
        plan_id: PlanId,
    ) -> impl Future<Output = Result<Option<Subscription>>> + Send;

    /// Atomically create or reactivate the record for a (user, plan) pair.
    ///
    /// A record counts as live when its status is active AND `expires_at`
    /// is after `now`. If a live record exists the call is a no-op returning
    /// [`ActivationOutcome::AlreadyActive`]; otherwise the record is created
    /// or reactivated in place with `purchased_at = now` and the supplied
    /// `expires_at`. The whole decision must be a single conditional write
    /// so concurrent subscribe calls for the same pair cannot both win.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn activate(
        &self,
        user_id: UserId,
        plan_id: PlanId,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<ActivationOutcome>> + Send;

    /// All records for `user_id` with stored status active, most recent
    /// purchase first. Callers still apply [`Subscription::is_live`];
    /// the store filters on stored status only.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn list_active_for_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Subscription>>> + Send;

    /// Delete every record referencing `plan_id` (plan-deletion cascade).
    ///
    /// # Returns
    ///
    /// Number of records deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_for_plan(&self, plan_id: PlanId) -> impl Future<Output = Result<u64>> + Send;
}
