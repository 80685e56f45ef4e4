//! PostgreSQL store implementations.
//!
//! Durable storage for accounts, plans, subscriptions and follows. The
//! schema (see `migrations/`) carries the invariants the providers promise:
//! pair-uniqueness for subscriptions and follows, and foreign-key cascades
//! so deleted entities leave no orphans.
//!
//! Queries are bound at runtime so the crate builds without a database.

mod account;
mod follow;
mod plan;
mod subscription;

pub use account::PostgresAccountStore;
pub use follow::PostgresFollowStore;
pub use plan::PostgresPlanStore;
pub use subscription::PostgresSubscriptionStore;

use crate::error::{PlatformError, Result};
use sqlx::PgPool;

/// Run database migrations.
///
/// # Errors
///
/// Returns error if migrations fail.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| PlatformError::Storage(format!("Migration failed: {e}")))?;
    Ok(())
}
