//! Mock subscription store for testing.

use crate::error::{PlatformError, Result};
use crate::providers::{ActivationOutcome, SubscriptionStore};
use crate::state::{PlanId, Subscription, SubscriptionId, SubscriptionStatus, UserId};
use chrono::{DateTime, Utc};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock subscription store.
///
/// Keyed by (user, plan), so pair-uniqueness holds by construction; the
/// mutex makes [`SubscriptionStore::activate`] a single atomic step, the
/// same guarantee the PostgreSQL store gets from its conditional upsert.
#[derive(Debug, Clone, Default)]
pub struct MockSubscriptionStore {
    subscriptions: Arc<Mutex<HashMap<(UserId, PlanId), Subscription>>>,
}

impl MockSubscriptionStore {
    /// Create a new mock subscription store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if the lock is poisoned.
    pub fn subscription_count(&self) -> Result<usize> {
        Ok(self
            .subscriptions
            .lock()
            .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?
            .len())
    }

    /// Seed a record directly, bypassing the activation path (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if the lock is poisoned.
    pub fn seed(&self, subscription: Subscription) -> Result<()> {
        self.subscriptions
            .lock()
            .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?
            .insert(
                (subscription.user_id, subscription.plan_id),
                subscription,
            );
        Ok(())
    }
}

impl SubscriptionStore for MockSubscriptionStore {
    fn find(
        &self,
        user_id: UserId,
        plan_id: PlanId,
    ) -> impl Future<Output = Result<Option<Subscription>>> + Send {
        let subscriptions = Arc::clone(&self.subscriptions);

        async move {
            Ok(subscriptions
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?
                .get(&(user_id, plan_id))
                .cloned())
        }
    }

    fn activate(
        &self,
        user_id: UserId,
        plan_id: PlanId,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<ActivationOutcome>> + Send {
        let subscriptions = Arc::clone(&self.subscriptions);

        async move {
            let mut guard = subscriptions
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?;

            match guard.entry((user_id, plan_id)) {
                Entry::Occupied(mut entry) => {
                    if entry.get().is_live(now) {
                        return Ok(ActivationOutcome::AlreadyActive);
                    }
                    let existing = entry.get_mut();
                    existing.status = SubscriptionStatus::Active;
                    existing.purchased_at = now;
                    existing.expires_at = expires_at;
                    Ok(ActivationOutcome::Reactivated(existing.clone()))
                }
                Entry::Vacant(entry) => {
                    let subscription = Subscription {
                        id: SubscriptionId::new(),
                        user_id,
                        plan_id,
                        status: SubscriptionStatus::Active,
                        purchased_at: now,
                        expires_at,
                    };
                    entry.insert(subscription.clone());
                    Ok(ActivationOutcome::Created(subscription))
                }
            }
        }
    }

    fn list_active_for_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Subscription>>> + Send {
        let subscriptions = Arc::clone(&self.subscriptions);

        async move {
            let guard = subscriptions
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?;

            let mut records: Vec<Subscription> = guard
                .values()
                .filter(|sub| {
                    sub.user_id == user_id && sub.status == SubscriptionStatus::Active
                })
                .cloned()
                .collect();
            records.sort_by(|a, b| b.purchased_at.cmp(&a.purchased_at));
            Ok(records)
        }
    }

    fn delete_for_plan(&self, plan_id: PlanId) -> impl Future<Output = Result<u64>> + Send {
        let subscriptions = Arc::clone(&self.subscriptions);

        async move {
            let mut guard = subscriptions
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?;

            let before = guard.len();
            guard.retain(|_, sub| sub.plan_id != plan_id);
            Ok((before - guard.len()) as u64)
        }
    }
}
