//! PostgreSQL plan store implementation.

use crate::error::{PlatformError, Result};
use crate::providers::PlanStore;
use crate::state::{Plan, PlanId, UserId};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// PostgreSQL plan store.
#[derive(Clone)]
pub struct PostgresPlanStore {
    /// PostgreSQL connection pool.
    pool: PgPool,
}

impl PostgresPlanStore {
    /// Create a new PostgreSQL plan store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PlanRow {
    id: uuid::Uuid,
    title: String,
    description: String,
    price: f64,
    duration_days: i64,
    trainer_id: uuid::Uuid,
    created_at: DateTime<Utc>,
}

impl From<PlanRow> for Plan {
    fn from(row: PlanRow) -> Self {
        Self {
            id: PlanId(row.id),
            title: row.title,
            description: row.description,
            price: row.price,
            duration_days: row.duration_days,
            trainer_id: UserId(row.trainer_id),
            created_at: row.created_at,
        }
    }
}

const PLAN_COLUMNS: &str = "id, title, description, price, duration_days, trainer_id, created_at";

impl PlanStore for PostgresPlanStore {
    async fn insert(&self, plan: &Plan) -> Result<()> {
        sqlx::query(
            "INSERT INTO plans (id, title, description, price, duration_days, trainer_id, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(plan.id.0)
        .bind(&plan.title)
        .bind(&plan.description)
        .bind(plan.price)
        .bind(plan.duration_days)
        .bind(plan.trainer_id.0)
        .bind(plan.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PlatformError::Storage(format!("Failed to insert plan: {e}")))?;

        Ok(())
    }

    async fn get(&self, plan_id: PlanId) -> Result<Option<Plan>> {
        let row: Option<PlanRow> = sqlx::query_as(&format!(
            "SELECT {PLAN_COLUMNS} FROM plans WHERE id = $1"
        ))
        .bind(plan_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PlatformError::Storage(format!("Failed to get plan: {e}")))?;

        Ok(row.map(Plan::from))
    }

    async fn list_all(&self) -> Result<Vec<Plan>> {
        let rows: Vec<PlanRow> = sqlx::query_as(&format!(
            "SELECT {PLAN_COLUMNS} FROM plans ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PlatformError::Storage(format!("Failed to list plans: {e}")))?;

        Ok(rows.into_iter().map(Plan::from).collect())
    }

    async fn list_by_trainer(&self, trainer_id: UserId) -> Result<Vec<Plan>> {
        let rows: Vec<PlanRow> = sqlx::query_as(&format!(
            "SELECT {PLAN_COLUMNS} FROM plans WHERE trainer_id = $1 ORDER BY created_at DESC"
        ))
        .bind(trainer_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PlatformError::Storage(format!("Failed to list trainer plans: {e}")))?;

        Ok(rows.into_iter().map(Plan::from).collect())
    }

    async fn list_by_trainers(&self, trainer_ids: &[UserId]) -> Result<Vec<Plan>> {
        let ids: Vec<uuid::Uuid> = trainer_ids.iter().map(|id| id.0).collect();

        let rows: Vec<PlanRow> = sqlx::query_as(&format!(
            "SELECT {PLAN_COLUMNS} FROM plans WHERE trainer_id = ANY($1) ORDER BY created_at DESC"
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PlatformError::Storage(format!("Failed to list trainer plans: {e}")))?;

        Ok(rows.into_iter().map(Plan::from).collect())
    }

    async fn update(&self, plan: &Plan) -> Result<()> {
        let result = sqlx::query(
            "UPDATE plans
             SET title = $2,
                 description = $3,
                 price = $4,
                 duration_days = $5
             WHERE id = $1",
        )
        .bind(plan.id.0)
        .bind(&plan.title)
        .bind(&plan.description)
        .bind(plan.price)
        .bind(plan.duration_days)
        .execute(&self.pool)
        .await
        .map_err(|e| PlatformError::Storage(format!("Failed to update plan: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(PlatformError::not_found("Plan"));
        }

        Ok(())
    }

    async fn delete(&self, plan_id: PlanId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM plans WHERE id = $1")
            .bind(plan_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| PlatformError::Storage(format!("Failed to delete plan: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}
