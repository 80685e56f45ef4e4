//! Mock account store for testing.

use crate::error::{PlatformError, Result};
use crate::providers::AccountStore;
use crate::state::{Account, Role, UserId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock account store.
///
/// Uses in-memory storage for testing.
#[derive(Debug, Clone, Default)]
pub struct MockAccountStore {
    accounts: Arc<Mutex<HashMap<UserId, Account>>>,
}

impl MockAccountStore {
    /// Create a new mock account store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account and return its ID (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if the lock is poisoned.
    pub fn seed(&self, account: Account) -> Result<UserId> {
        let id = account.id;
        self.accounts
            .lock()
            .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?
            .insert(id, account);
        Ok(id)
    }
}

impl AccountStore for MockAccountStore {
    fn get(&self, user_id: UserId) -> impl Future<Output = Result<Option<Account>>> + Send {
        let accounts = Arc::clone(&self.accounts);

        async move {
            Ok(accounts
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?
                .get(&user_id)
                .cloned())
        }
    }

    fn get_many(&self, ids: &[UserId]) -> impl Future<Output = Result<Vec<Account>>> + Send {
        let accounts = Arc::clone(&self.accounts);
        let ids = ids.to_vec();

        async move {
            let guard = accounts
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?;
            Ok(ids.iter().filter_map(|id| guard.get(id).cloned()).collect())
        }
    }

    fn list_trainers(&self) -> impl Future<Output = Result<Vec<Account>>> + Send {
        let accounts = Arc::clone(&self.accounts);

        async move {
            let guard = accounts
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?;

            let mut trainers: Vec<Account> = guard
                .values()
                .filter(|account| account.role == Role::Trainer)
                .cloned()
                .collect();
            trainers.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            Ok(trainers)
        }
    }

    fn insert(&self, account: &Account) -> impl Future<Output = Result<()>> + Send {
        let accounts = Arc::clone(&self.accounts);
        let account = account.clone();

        async move {
            let mut guard = accounts
                .lock()
                .map_err(|_| PlatformError::Storage("Mutex lock failed".to_string()))?;

            if guard.values().any(|existing| existing.email == account.email) {
                return Err(PlatformError::Storage("Email already exists".to_string()));
            }

            guard.insert(account.id, account);
            Ok(())
        }
    }
}
