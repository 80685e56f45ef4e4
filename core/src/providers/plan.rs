//! Plan store trait.

use crate::error::Result;
use crate::state::{Plan, PlanId, UserId};
use std::future::Future;

/// Plan storage.
///
/// Listing methods return plans newest-first; the ordering is part of the
/// contract because every listing surface presents plans that way.
pub trait PlanStore: Send + Sync {
    /// Insert a new plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn insert(&self, plan: &Plan) -> impl Future<Output = Result<()>> + Send;

    /// Fetch a plan by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails. A missing plan is `Ok(None)`,
    /// not an error.
    fn get(&self, plan_id: PlanId) -> impl Future<Output = Result<Option<Plan>>> + Send;

    /// All plans, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Plan>>> + Send;

    /// All plans authored by `trainer_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn list_by_trainer(
        &self,
        trainer_id: UserId,
    ) -> impl Future<Output = Result<Vec<Plan>>> + Send;

    /// All plans authored by any of `trainer_ids`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn list_by_trainers(
        &self,
        trainer_ids: &[UserId],
    ) -> impl Future<Output = Result<Vec<Plan>>> + Send;

    /// Overwrite an existing plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan does not exist, or an error if the
    /// write fails.
    fn update(&self, plan: &Plan) -> impl Future<Output = Result<()>> + Send;

    /// Delete a plan.
    ///
    /// # Returns
    ///
    /// `true` if a plan was deleted, `false` if none existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete(&self, plan_id: PlanId) -> impl Future<Output = Result<bool>> + Send;
}
