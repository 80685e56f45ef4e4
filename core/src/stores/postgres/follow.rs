//! PostgreSQL follow store implementation.

use crate::error::{PlatformError, Result};
use crate::providers::FollowStore;
use crate::state::{Follow, UserId};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// PostgreSQL follow store.
#[derive(Clone)]
pub struct PostgresFollowStore {
    /// PostgreSQL connection pool.
    pool: PgPool,
}

impl PostgresFollowStore {
    /// Create a new PostgreSQL follow store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FollowRow {
    user_id: uuid::Uuid,
    trainer_id: uuid::Uuid,
    followed_at: DateTime<Utc>,
}

impl From<FollowRow> for Follow {
    fn from(row: FollowRow) -> Self {
        Self {
            user_id: UserId(row.user_id),
            trainer_id: UserId(row.trainer_id),
            followed_at: row.followed_at,
        }
    }
}

impl FollowStore for PostgresFollowStore {
    async fn insert(&self, follow: &Follow) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO follows (user_id, trainer_id, followed_at)
             VALUES ($1, $2, $3)",
        )
        .bind(follow.user_id.0)
        .bind(follow.trainer_id.0)
        .bind(follow.followed_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Ok(false),
            Err(e) => Err(PlatformError::Storage(format!(
                "Failed to insert follow: {e}"
            ))),
        }
    }

    async fn delete(&self, user_id: UserId, trainer_id: UserId) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM follows WHERE user_id = $1 AND trainer_id = $2",
        )
        .bind(user_id.0)
        .bind(trainer_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| PlatformError::Storage(format!("Failed to delete follow: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, user_id: UserId, trainer_id: UserId) -> Result<bool> {
        let row: Option<FollowRow> = sqlx::query_as(
            "SELECT user_id, trainer_id, followed_at
             FROM follows
             WHERE user_id = $1 AND trainer_id = $2",
        )
        .bind(user_id.0)
        .bind(trainer_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PlatformError::Storage(format!("Failed to check follow: {e}")))?;

        Ok(row.is_some())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Follow>> {
        let rows: Vec<FollowRow> = sqlx::query_as(
            "SELECT user_id, trainer_id, followed_at
             FROM follows
             WHERE user_id = $1
             ORDER BY followed_at DESC",
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PlatformError::Storage(format!("Failed to list follows: {e}")))?;

        Ok(rows.into_iter().map(Follow::from).collect())
    }
}
