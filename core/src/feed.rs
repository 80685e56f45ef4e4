//! The feed composer.
//!
//! Joins the follow graph with the plan catalog and annotates each entry
//! through the entitlement engine: followed trainers' plans, newest first,
//! shaped for the viewer.

use crate::entitlement::EntitlementEngine;
use crate::error::Result;
use crate::follow::FollowGraph;
use crate::providers::{account, AccountStore, FollowStore, PlanStore, SubscriptionStore};
use crate::state::Viewer;
use crate::views::{FeedItem, PlanView};

/// Personalized feed composition.
#[derive(Clone)]
pub struct FeedComposer<P, F, S, A> {
    plans: P,
    graph: FollowGraph<A, F>,
    entitlement: EntitlementEngine<S>,
    accounts: A,
}

impl<P, F, S, A> FeedComposer<P, F, S, A>
where
    P: PlanStore,
    F: FollowStore,
    S: SubscriptionStore,
    A: AccountStore,
{
    /// Create a new composer over the given stores and follow graph.
    pub const fn new(
        plans: P,
        graph: FollowGraph<A, F>,
        entitlement: EntitlementEngine<S>,
        accounts: A,
    ) -> Self {
        Self {
            plans,
            graph,
            entitlement,
            accounts,
        }
    }

    /// Compose the viewer's feed.
    ///
    /// Anonymous viewers get an empty feed; the HTTP surface additionally
    /// rejects them before getting here, but the component contract stands
    /// on its own.
    ///
    /// # Errors
    ///
    /// Returns an error if a store read fails.
    pub async fn compose(&self, viewer: &Viewer) -> Result<Vec<FeedItem>> {
        let Some(user_id) = viewer.user_id() else {
            return Ok(Vec::new());
        };

        let trainer_ids = self.graph.followed_trainer_ids(user_id).await?;
        if trainer_ids.is_empty() {
            return Ok(Vec::new());
        }

        let plans = self.plans.list_by_trainers(&trainer_ids).await?;

        let accessible = self.entitlement.active_plan_ids(viewer).await?;
        let summaries = account::trainer_summaries(
            &self.accounts,
            plans.iter().map(|plan| plan.trainer_id),
        )
        .await?;

        Ok(plans
            .iter()
            .map(|plan| {
                let is_subscribed = accessible.contains(&plan.id);
                FeedItem {
                    plan: PlanView::project(
                        plan,
                        summaries.get(&plan.trainer_id).cloned(),
                        is_subscribed,
                    ),
                    is_subscribed,
                }
            })
            .collect())
    }
}
