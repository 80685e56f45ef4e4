//! Account store trait.

use crate::error::Result;
use crate::state::{Account, Role, TrainerSummary, UserId};
use std::collections::HashMap;
use std::future::Future;

/// Account storage.
///
/// Accounts are owned by the identity collaborator; the platform reads them
/// and only inserts for seeding and tests.
pub trait AccountStore: Send + Sync {
    /// Fetch an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails. A missing account is `Ok(None)`.
    fn get(&self, user_id: UserId) -> impl Future<Output = Result<Option<Account>>> + Send;

    /// Fetch several accounts at once. Missing IDs are silently absent from
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn get_many(&self, ids: &[UserId]) -> impl Future<Output = Result<Vec<Account>>> + Send;

    /// All trainer-role accounts, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn list_trainers(&self) -> impl Future<Output = Result<Vec<Account>>> + Send;

    /// Insert an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or the email is taken.
    fn insert(&self, account: &Account) -> impl Future<Output = Result<()>> + Send;
}

/// Resolve the trainer summaries for a set of plans' authors in one read.
///
/// Only trainer-role accounts are summarized; a deleted or re-roled author
/// is simply absent from the map, and callers degrade to an omitted
/// `trainer` field rather than failing the response.
///
/// # Errors
///
/// Returns an error if the read fails.
pub async fn trainer_summaries<A: AccountStore>(
    accounts: &A,
    trainer_ids: impl IntoIterator<Item = UserId>,
) -> Result<HashMap<UserId, TrainerSummary>> {
    let mut ids: Vec<UserId> = trainer_ids.into_iter().collect();
    ids.sort_unstable_by_key(|id| id.0);
    ids.dedup();

    let resolved = accounts.get_many(&ids).await?;
    Ok(resolved
        .iter()
        .filter(|account| account.role == Role::Trainer)
        .map(|account| (account.id, TrainerSummary::from(account)))
        .collect())
}
