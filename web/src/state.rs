//! Application state for Axum handlers.
//!
//! One bundle of platform services, generic over the store implementations
//! the binary (or a test) wires in. Services are cheap clones over shared
//! store handles, so the state clones per-request without cost.

use stride_core::providers::{
    AccountStore, FollowStore, PlanStore, SessionStore, SubscriptionStore,
};
use stride_core::{
    EntitlementEngine, FeedComposer, FollowGraph, IdentityResolver, PlanCatalog,
    SubscriptionLedger,
};

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState<P, Sub, Fol, Acc, Ses> {
    /// Resolves bearer credentials to viewers, once per request.
    pub identity: IdentityResolver<Ses, Acc>,
    /// Plan CRUD and trainer surfaces.
    pub catalog: PlanCatalog<P, Acc, Sub, Fol>,
    /// Subscription lifecycle.
    pub ledger: SubscriptionLedger<P, Sub, Acc>,
    /// Follow relation management.
    pub graph: FollowGraph<Acc, Fol>,
    /// Personalized feed composition.
    pub feed: FeedComposer<P, Fol, Sub, Acc>,
}

impl<P, Sub, Fol, Acc, Ses> AppState<P, Sub, Fol, Acc, Ses>
where
    P: PlanStore + Clone,
    Sub: SubscriptionStore + Clone,
    Fol: FollowStore + Clone,
    Acc: AccountStore + Clone,
    Ses: SessionStore + Clone,
{
    /// Wire the full service stack over the given stores.
    pub fn new(plans: P, subscriptions: Sub, follows: Fol, accounts: Acc, sessions: Ses) -> Self {
        let graph = FollowGraph::new(accounts.clone(), follows.clone());
        Self {
            identity: IdentityResolver::new(sessions, accounts.clone()),
            catalog: PlanCatalog::new(
                plans.clone(),
                accounts.clone(),
                subscriptions.clone(),
                follows,
            ),
            ledger: SubscriptionLedger::new(
                plans.clone(),
                subscriptions.clone(),
                accounts.clone(),
            ),
            graph: graph.clone(),
            feed: FeedComposer::new(
                plans,
                graph,
                EntitlementEngine::new(subscriptions),
                accounts,
            ),
        }
    }
}
