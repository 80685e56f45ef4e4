//! The follow graph.
//!
//! A unique (user, trainer) edge set expressing interest in a trainer's
//! future plans. Follows carry no entitlement; they only drive the feed.

use crate::error::{PlatformError, Result};
use crate::providers::{account, AccountStore, FollowStore};
use crate::state::{Follow, Role, UserId};
use crate::views::FollowedTrainer;
use chrono::Utc;

/// Follow relation management over account and follow stores.
#[derive(Clone)]
pub struct FollowGraph<A, F> {
    accounts: A,
    follows: F,
}

impl<A, F> FollowGraph<A, F>
where
    A: AccountStore,
    F: FollowStore,
{
    /// Create a new follow graph over the given stores.
    pub const fn new(accounts: A, follows: F) -> Self {
        Self { accounts, follows }
    }

    /// Create a follow edge from `user_id` to `trainer_id`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the target does not resolve to a trainer account
    /// - `Validation` on self-follow
    /// - `Conflict` if the edge already exists
    /// - `Storage` if a store operation fails
    pub async fn follow(&self, user_id: UserId, trainer_id: UserId) -> Result<Follow> {
        let target = self
            .accounts
            .get(trainer_id)
            .await?
            .filter(|account| account.role == Role::Trainer)
            .ok_or(PlatformError::not_found("Trainer"))?;

        if target.id == user_id {
            return Err(PlatformError::validation(
                "trainerId",
                "cannot follow yourself",
            ));
        }

        let follow = Follow {
            user_id,
            trainer_id,
            followed_at: Utc::now(),
        };

        // The store's uniqueness constraint decides; a pre-check would race
        // concurrent follow calls for the same pair.
        if !self.follows.insert(&follow).await? {
            return Err(PlatformError::Conflict(
                "Already following this trainer".to_string(),
            ));
        }

        tracing::info!(
            user_id = %user_id.0,
            trainer_id = %trainer_id.0,
            "Follow created"
        );
        Ok(follow)
    }

    /// Remove the follow edge from `user_id` to `trainer_id`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no such edge exists
    /// - `Storage` if the write fails
    pub async fn unfollow(&self, user_id: UserId, trainer_id: UserId) -> Result<()> {
        if !self.follows.delete(user_id, trainer_id).await? {
            return Err(PlatformError::not_found("Follow"));
        }

        tracing::info!(
            user_id = %user_id.0,
            trainer_id = %trainer_id.0,
            "Follow removed"
        );
        Ok(())
    }

    /// Whether `user_id` follows `trainer_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub async fn is_following(&self, user_id: UserId, trainer_id: UserId) -> Result<bool> {
        self.follows.exists(user_id, trainer_id).await
    }

    /// The trainers `user_id` follows, in edge order (most recent first).
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub async fn followed_trainer_ids(&self, user_id: UserId) -> Result<Vec<UserId>> {
        let edges = self.follows.list_for_user(user_id).await?;
        Ok(edges.into_iter().map(|edge| edge.trainer_id).collect())
    }

    /// The viewer's following list with trainer summaries, most recent
    /// first. A vanished trainer account degrades to an omitted summary.
    ///
    /// # Errors
    ///
    /// Returns an error if a store read fails.
    pub async fn following(&self, user_id: UserId) -> Result<Vec<FollowedTrainer>> {
        let edges = self.follows.list_for_user(user_id).await?;
        let summaries = account::trainer_summaries(
            &self.accounts,
            edges.iter().map(|edge| edge.trainer_id),
        )
        .await?;

        Ok(edges
            .into_iter()
            .map(|edge| FollowedTrainer {
                trainer: summaries.get(&edge.trainer_id).cloned(),
                followed_at: edge.followed_at,
            })
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mocks::{MockAccountStore, MockFollowStore};
    use crate::state::Account;

    fn graph() -> (
        FollowGraph<MockAccountStore, MockFollowStore>,
        MockAccountStore,
        MockFollowStore,
    ) {
        let accounts = MockAccountStore::new();
        let follows = MockFollowStore::new();
        (
            FollowGraph::new(accounts.clone(), follows.clone()),
            accounts,
            follows,
        )
    }

    fn seed_account(accounts: &MockAccountStore, role: Role) -> UserId {
        accounts
            .seed(Account {
                id: UserId::new(),
                name: "Sam".to_string(),
                email: format!("{}@example.com", uuid::Uuid::new_v4()),
                role,
                created_at: Utc::now(),
            })
            .unwrap()
    }

    #[tokio::test]
    async fn follow_requires_a_trainer_target() {
        let (graph, accounts, _) = graph();
        let user = seed_account(&accounts, Role::User);
        let other_user = seed_account(&accounts, Role::User);

        let missing = graph.follow(user, UserId::new()).await;
        assert_eq!(missing, Err(PlatformError::not_found("Trainer")));

        let not_trainer = graph.follow(user, other_user).await;
        assert_eq!(not_trainer, Err(PlatformError::not_found("Trainer")));
    }

    #[tokio::test]
    async fn self_follow_is_rejected() {
        let (graph, accounts, _) = graph();
        let trainer = seed_account(&accounts, Role::Trainer);

        let result = graph.follow(trainer, trainer).await;
        assert!(matches!(result, Err(PlatformError::Validation { .. })));
    }

    #[tokio::test]
    async fn duplicate_follow_is_a_conflict() {
        let (graph, accounts, follows) = graph();
        let user = seed_account(&accounts, Role::User);
        let trainer = seed_account(&accounts, Role::Trainer);

        graph.follow(user, trainer).await.unwrap();
        let duplicate = graph.follow(user, trainer).await;
        assert!(matches!(duplicate, Err(PlatformError::Conflict(_))));
        assert_eq!(follows.follow_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn follow_unfollow_round_trip_restores_state() {
        let (graph, accounts, _) = graph();
        let user = seed_account(&accounts, Role::User);
        let trainer = seed_account(&accounts, Role::Trainer);

        let before = graph.followed_trainer_ids(user).await.unwrap();
        graph.follow(user, trainer).await.unwrap();
        assert!(graph.is_following(user, trainer).await.unwrap());

        graph.unfollow(user, trainer).await.unwrap();
        assert_eq!(graph.followed_trainer_ids(user).await.unwrap(), before);
    }

    #[tokio::test]
    async fn unfollow_without_edge_is_not_found() {
        let (graph, accounts, _) = graph();
        let user = seed_account(&accounts, Role::User);
        let trainer = seed_account(&accounts, Role::Trainer);

        let result = graph.unfollow(user, trainer).await;
        assert_eq!(result, Err(PlatformError::not_found("Follow")));
    }

    #[tokio::test]
    async fn following_list_carries_summaries() {
        let (graph, accounts, _) = graph();
        let user = seed_account(&accounts, Role::User);
        let trainer = seed_account(&accounts, Role::Trainer);

        graph.follow(user, trainer).await.unwrap();
        let list = graph.following(user).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].trainer.as_ref().unwrap().id, trainer);
    }
}
