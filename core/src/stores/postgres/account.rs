//! PostgreSQL account store implementation.

use crate::error::{PlatformError, Result};
use crate::providers::AccountStore;
use crate::state::{Account, Role, UserId};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// PostgreSQL account store.
#[derive(Clone)]
pub struct PostgresAccountStore {
    /// PostgreSQL connection pool.
    pool: PgPool,
}

impl PostgresAccountStore {
    /// Create a new PostgreSQL account store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: uuid::Uuid,
    name: String,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> Result<Account> {
        let role = Role::parse(&self.role).ok_or_else(|| {
            PlatformError::Storage(format!("Invalid account role: {}", self.role))
        })?;

        Ok(Account {
            id: UserId(self.id),
            name: self.name,
            email: self.email,
            role,
            created_at: self.created_at,
        })
    }
}

impl AccountStore for PostgresAccountStore {
    async fn get(&self, user_id: UserId) -> Result<Option<Account>> {
        let row: Option<AccountRow> = sqlx::query_as(
            "SELECT id, name, email, role, created_at FROM accounts WHERE id = $1",
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PlatformError::Storage(format!("Failed to get account: {e}")))?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn get_many(&self, ids: &[UserId]) -> Result<Vec<Account>> {
        let raw_ids: Vec<uuid::Uuid> = ids.iter().map(|id| id.0).collect();

        let rows: Vec<AccountRow> = sqlx::query_as(
            "SELECT id, name, email, role, created_at FROM accounts WHERE id = ANY($1)",
        )
        .bind(&raw_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PlatformError::Storage(format!("Failed to get accounts: {e}")))?;

        rows.into_iter().map(AccountRow::into_account).collect()
    }

    async fn list_trainers(&self) -> Result<Vec<Account>> {
        let rows: Vec<AccountRow> = sqlx::query_as(
            "SELECT id, name, email, role, created_at
             FROM accounts
             WHERE role = 'trainer'
             ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PlatformError::Storage(format!("Failed to list trainers: {e}")))?;

        rows.into_iter().map(AccountRow::into_account).collect()
    }

    async fn insert(&self, account: &Account) -> Result<()> {
        sqlx::query(
            "INSERT INTO accounts (id, name, email, role, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(account.id.0)
        .bind(&account.name)
        .bind(&account.email)
        .bind(account.role.as_str())
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return PlatformError::Storage("Email already exists".to_string());
                }
            }
            PlatformError::Storage(format!("Failed to insert account: {e}"))
        })?;

        Ok(())
    }
}
