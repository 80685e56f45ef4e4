//! PostgreSQL subscription store implementation.
//!
//! The activation path is a single conditional upsert: the `(user_id,
//! plan_id)` unique constraint routes concurrent subscribe calls into one
//! row, and the `DO UPDATE .. WHERE` clause refuses to touch a live record,
//! so check-then-insert races cannot create duplicates or clobber a live
//! window.

use crate::error::{PlatformError, Result};
use crate::providers::{ActivationOutcome, SubscriptionStore};
use crate::state::{PlanId, Subscription, SubscriptionId, SubscriptionStatus, UserId};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// PostgreSQL subscription store.
#[derive(Clone)]
pub struct PostgresSubscriptionStore {
    /// PostgreSQL connection pool.
    pool: PgPool,
}

impl PostgresSubscriptionStore {
    /// Create a new PostgreSQL subscription store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SubscriptionRow {
    id: uuid::Uuid,
    user_id: uuid::Uuid,
    plan_id: uuid::Uuid,
    status: String,
    purchased_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl SubscriptionRow {
    fn into_subscription(self) -> Result<Subscription> {
        let status = SubscriptionStatus::parse(&self.status).ok_or_else(|| {
            PlatformError::Storage(format!("Invalid subscription status: {}", self.status))
        })?;

        Ok(Subscription {
            id: SubscriptionId(self.id),
            user_id: UserId(self.user_id),
            plan_id: PlanId(self.plan_id),
            status,
            purchased_at: self.purchased_at,
            expires_at: self.expires_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ActivationRow {
    id: uuid::Uuid,
    user_id: uuid::Uuid,
    plan_id: uuid::Uuid,
    status: String,
    purchased_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    inserted: bool,
}

impl SubscriptionStore for PostgresSubscriptionStore {
    async fn find(&self, user_id: UserId, plan_id: PlanId) -> Result<Option<Subscription>> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            "SELECT id, user_id, plan_id, status, purchased_at, expires_at
             FROM subscriptions
             WHERE user_id = $1 AND plan_id = $2",
        )
        .bind(user_id.0)
        .bind(plan_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PlatformError::Storage(format!("Failed to get subscription: {e}")))?;

        row.map(SubscriptionRow::into_subscription).transpose()
    }

    async fn activate(
        &self,
        user_id: UserId,
        plan_id: PlanId,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<ActivationOutcome> {
        // `xmax = 0` distinguishes a fresh insert from a conflict-update of
        // the existing row; RETURNING no row means the WHERE clause saw a
        // live record and declined the update.
        let row: Option<ActivationRow> = sqlx::query_as(
            "INSERT INTO subscriptions (id, user_id, plan_id, status, purchased_at, expires_at)
             VALUES ($1, $2, $3, 'active', $4, $5)
             ON CONFLICT (user_id, plan_id) DO UPDATE
             SET status = 'active',
                 purchased_at = EXCLUDED.purchased_at,
                 expires_at = EXCLUDED.expires_at
             WHERE subscriptions.status <> 'active'
                OR subscriptions.expires_at <= EXCLUDED.purchased_at
             RETURNING id, user_id, plan_id, status, purchased_at, expires_at,
                       (xmax = 0) AS inserted",
        )
        .bind(SubscriptionId::new().0)
        .bind(user_id.0)
        .bind(plan_id.0)
        .bind(now)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PlatformError::Storage(format!("Failed to activate subscription: {e}")))?;

        let Some(row) = row else {
            return Ok(ActivationOutcome::AlreadyActive);
        };

        let inserted = row.inserted;
        let subscription = SubscriptionRow {
            id: row.id,
            user_id: row.user_id,
            plan_id: row.plan_id,
            status: row.status,
            purchased_at: row.purchased_at,
            expires_at: row.expires_at,
        }
        .into_subscription()?;

        if inserted {
            Ok(ActivationOutcome::Created(subscription))
        } else {
            Ok(ActivationOutcome::Reactivated(subscription))
        }
    }

    async fn list_active_for_user(&self, user_id: UserId) -> Result<Vec<Subscription>> {
        let rows: Vec<SubscriptionRow> = sqlx::query_as(
            "SELECT id, user_id, plan_id, status, purchased_at, expires_at
             FROM subscriptions
             WHERE user_id = $1 AND status = 'active'
             ORDER BY purchased_at DESC",
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PlatformError::Storage(format!("Failed to list subscriptions: {e}")))?;

        rows.into_iter()
            .map(SubscriptionRow::into_subscription)
            .collect()
    }

    async fn delete_for_plan(&self, plan_id: PlanId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE plan_id = $1")
            .bind(plan_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                PlatformError::Storage(format!("Failed to delete subscriptions: {e}"))
            })?;

        Ok(result.rows_affected())
    }
}
