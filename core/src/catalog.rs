//! The plan catalog.
//!
//! Plan CRUD with ownership checks, plus the trainer directory and profile
//! surfaces. All response shaping is delegated to the entitlement engine;
//! the catalog never selects plan fields by hand.

use crate::entitlement::EntitlementEngine;
use crate::error::{PlatformError, Result};
use crate::providers::{
    account, AccountStore, FollowStore, PlanStore, SubscriptionStore,
};
use crate::state::{Plan, PlanId, Role, TrainerSummary, UserId, Viewer};
use crate::views::{PlanRecord, PlanView, TrainerListing, TrainerProfile};
use chrono::Utc;

/// Input for creating a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlan {
    /// Plan title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Price. Non-negative.
    pub price: f64,
    /// Access window in days. At least 1.
    pub duration_days: i64,
}

/// A partial update. `None` means "not supplied"; a supplied value is
/// applied even when falsy (`price: Some(0.0)` sets the price to zero),
/// except that text fields reject empty strings: an update cannot blank
/// a title or description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanPatch {
    /// New title, if supplied.
    pub title: Option<String>,
    /// New description, if supplied.
    pub description: Option<String>,
    /// New price, if supplied.
    pub price: Option<f64>,
    /// New access window in days, if supplied.
    pub duration_days: Option<i64>,
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(PlatformError::validation("title", "must not be empty"));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(PlatformError::validation(
            "description",
            "must not be empty",
        ));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(PlatformError::validation("price", "must be non-negative"));
    }
    Ok(())
}

fn validate_duration(duration_days: i64) -> Result<()> {
    if duration_days < 1 {
        return Err(PlatformError::validation(
            "duration",
            "must be at least 1 day",
        ));
    }
    Ok(())
}

/// Plan CRUD and trainer surfaces over the platform stores.
#[derive(Clone)]
pub struct PlanCatalog<P, A, S, F> {
    plans: P,
    accounts: A,
    subscriptions: S,
    follows: F,
    entitlement: EntitlementEngine<S>,
}

impl<P, A, S, F> PlanCatalog<P, A, S, F>
where
    P: PlanStore,
    A: AccountStore,
    S: SubscriptionStore + Clone,
    F: FollowStore,
{
    /// Create a new catalog over the given stores.
    pub fn new(plans: P, accounts: A, subscriptions: S, follows: F) -> Self {
        let entitlement = EntitlementEngine::new(subscriptions.clone());
        Self {
            plans,
            accounts,
            subscriptions,
            follows,
            entitlement,
        }
    }

    /// All plans, newest first, shaped for `viewer`.
    ///
    /// # Errors
    ///
    /// Returns an error if a store read fails.
    pub async fn list(&self, viewer: &Viewer) -> Result<Vec<PlanView>> {
        let plans = self.plans.list_all().await?;
        self.project_all(viewer, &plans).await
    }

    /// One plan, shaped for `viewer`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the plan does not exist
    /// - `Storage` if a store read fails
    pub async fn get(&self, viewer: &Viewer, plan_id: PlanId) -> Result<PlanView> {
        let plan = self
            .plans
            .get(plan_id)
            .await?
            .ok_or(PlatformError::not_found("Plan"))?;

        let trainer = self.trainer_summary(plan.trainer_id).await?;
        self.entitlement.project(viewer, &plan, trainer).await
    }

    /// Create a plan owned by `trainer_id`.
    ///
    /// # Errors
    ///
    /// - `Validation` if a field is missing or out of range
    /// - `Storage` if the write fails
    pub async fn create(&self, trainer_id: UserId, new_plan: NewPlan) -> Result<PlanRecord> {
        validate_title(&new_plan.title)?;
        validate_description(&new_plan.description)?;
        validate_price(new_plan.price)?;
        validate_duration(new_plan.duration_days)?;

        let plan = Plan {
            id: PlanId::new(),
            title: new_plan.title,
            description: new_plan.description,
            price: new_plan.price,
            duration_days: new_plan.duration_days,
            trainer_id,
            created_at: Utc::now(),
        };
        self.plans.insert(&plan).await?;

        tracing::info!(plan_id = %plan.id.0, trainer_id = %trainer_id.0, "Plan created");

        let trainer = self.trainer_summary(trainer_id).await?;
        Ok(PlanRecord::new(&plan, trainer))
    }

    /// Apply a partial update to a plan owned by `trainer_id`.
    ///
    /// Only supplied fields are overwritten. `price: Some(0.0)` is applied
    /// (explicit presence check, not truthiness); supplied-but-empty text
    /// fields are rejected rather than silently ignored.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the plan does not exist
    /// - `Forbidden` if `trainer_id` is not the owner
    /// - `Validation` if a supplied field is out of range
    /// - `Storage` if a store operation fails
    pub async fn update(
        &self,
        trainer_id: UserId,
        plan_id: PlanId,
        patch: PlanPatch,
    ) -> Result<PlanRecord> {
        let mut plan = self
            .plans
            .get(plan_id)
            .await?
            .ok_or(PlatformError::not_found("Plan"))?;

        if plan.trainer_id != trainer_id {
            return Err(PlatformError::Forbidden(
                "Not authorized to edit this plan".to_string(),
            ));
        }

        if let Some(title) = patch.title {
            validate_title(&title)?;
            plan.title = title;
        }
        if let Some(description) = patch.description {
            validate_description(&description)?;
            plan.description = description;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
            plan.price = price;
        }
        if let Some(duration_days) = patch.duration_days {
            validate_duration(duration_days)?;
            plan.duration_days = duration_days;
        }

        self.plans.update(&plan).await?;

        tracing::info!(plan_id = %plan.id.0, trainer_id = %trainer_id.0, "Plan updated");

        let trainer = self.trainer_summary(trainer_id).await?;
        Ok(PlanRecord::new(&plan, trainer))
    }

    /// Delete a plan owned by `trainer_id`, cascading subscription cleanup
    /// so no orphaned entitlements remain.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the plan does not exist
    /// - `Forbidden` if `trainer_id` is not the owner
    /// - `Storage` if a store operation fails
    pub async fn delete(&self, trainer_id: UserId, plan_id: PlanId) -> Result<()> {
        let plan = self
            .plans
            .get(plan_id)
            .await?
            .ok_or(PlatformError::not_found("Plan"))?;

        if plan.trainer_id != trainer_id {
            return Err(PlatformError::Forbidden(
                "Not authorized to delete this plan".to_string(),
            ));
        }

        self.plans.delete(plan_id).await?;
        let removed = self.subscriptions.delete_for_plan(plan_id).await?;

        tracing::info!(
            plan_id = %plan_id.0,
            trainer_id = %trainer_id.0,
            subscriptions_removed = removed,
            "Plan deleted"
        );
        Ok(())
    }

    /// All trainer accounts, as public listings.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub async fn list_trainers(&self) -> Result<Vec<TrainerListing>> {
        let trainers = self.accounts.list_trainers().await?;
        Ok(trainers
            .into_iter()
            .map(|account| TrainerListing {
                id: account.id,
                name: account.name,
                email: account.email,
                created_at: account.created_at,
            })
            .collect())
    }

    /// A trainer's public profile: the trainer, their plans shaped for
    /// `viewer`, and whether the viewer follows them.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the target does not resolve to a trainer account
    /// - `Storage` if a store read fails
    pub async fn trainer_profile(
        &self,
        viewer: &Viewer,
        trainer_id: UserId,
    ) -> Result<TrainerProfile> {
        let trainer = self
            .accounts
            .get(trainer_id)
            .await?
            .filter(|account| account.role == Role::Trainer)
            .ok_or(PlatformError::not_found("Trainer"))?;

        let plans = self.plans.list_by_trainer(trainer_id).await?;
        let views = self.project_all(viewer, &plans).await?;

        let is_following = match viewer.user_id() {
            Some(user_id) => self.follows.exists(user_id, trainer_id).await?,
            None => false,
        };

        Ok(TrainerProfile {
            trainer: TrainerListing {
                id: trainer.id,
                name: trainer.name,
                email: trainer.email,
                created_at: trainer.created_at,
            },
            plans: views,
            is_following,
        })
    }

    /// Shape a batch of plans for `viewer` with one entitlement read and
    /// one account read.
    async fn project_all(&self, viewer: &Viewer, plans: &[Plan]) -> Result<Vec<PlanView>> {
        let accessible = self.entitlement.active_plan_ids(viewer).await?;
        let summaries = account::trainer_summaries(
            &self.accounts,
            plans.iter().map(|plan| plan.trainer_id),
        )
        .await?;

        Ok(plans
            .iter()
            .map(|plan| {
                PlanView::project(
                    plan,
                    summaries.get(&plan.trainer_id).cloned(),
                    accessible.contains(&plan.id),
                )
            })
            .collect())
    }

    async fn trainer_summary(&self, trainer_id: UserId) -> Result<Option<TrainerSummary>> {
        let summaries = account::trainer_summaries(&self.accounts, [trainer_id]).await?;
        Ok(summaries.get(&trainer_id).cloned())
    }
}
