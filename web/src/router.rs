//! Platform router composition.
//!
//! Composes all platform handlers into a single Axum router.

use crate::handlers::{feed, health, plans, subscriptions, trainers};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use stride_core::providers::{
    AccountStore, FollowStore, PlanStore, SessionStore, SubscriptionStore,
};

/// Create the platform router with all endpoints.
///
/// # Routes
///
/// ## Plans
/// - `GET /plans` - List plans (viewer-shaped)
/// - `POST /plans` - Create plan (trainer)
/// - `GET /plans/:id` - Fetch one plan (viewer-shaped)
/// - `PUT /plans/:id` - Update plan (owner)
/// - `DELETE /plans/:id` - Delete plan (owner, cascades subscriptions)
///
/// ## Subscriptions
/// - `POST /subscriptions/:planId` - Subscribe / reactivate
/// - `GET /subscriptions/my-subscriptions` - The viewer's live subscriptions
///
/// ## Feed
/// - `GET /feed` - Personalized feed
///
/// ## Trainers
/// - `GET /trainers` - Trainer directory
/// - `GET /trainers/following/list` - The viewer's following list
/// - `GET /trainers/:id` - Trainer profile
/// - `POST /trainers/:id/follow` - Follow
/// - `DELETE /trainers/:id/follow` - Unfollow
///
/// ## Health
/// - `GET /health` - Liveness
///
/// # Example
///
/// ```rust,ignore
/// let state = AppState::new(plans, subscriptions, follows, accounts, sessions);
/// let app = Router::new()
///     .nest("/api", platform_router(state))
///     .layer(correlation_id_layer());
/// ```
pub fn platform_router<P, Sub, Fol, Acc, Ses>(
    state: AppState<P, Sub, Fol, Acc, Ses>,
) -> Router
where
    P: PlanStore + Clone + 'static,
    Sub: SubscriptionStore + Clone + 'static,
    Fol: FollowStore + Clone + 'static,
    Acc: AccountStore + Clone + 'static,
    Ses: SessionStore + Clone + 'static,
{
    Router::new()
        // Plan routes
        .route(
            "/plans",
            get(plans::list_plans::<P, Sub, Fol, Acc, Ses>)
                .post(plans::create_plan::<P, Sub, Fol, Acc, Ses>),
        )
        .route(
            "/plans/:id",
            get(plans::get_plan::<P, Sub, Fol, Acc, Ses>)
                .put(plans::update_plan::<P, Sub, Fol, Acc, Ses>)
                .delete(plans::delete_plan::<P, Sub, Fol, Acc, Ses>),
        )
        // Subscription routes
        .route(
            "/subscriptions/my-subscriptions",
            get(subscriptions::my_subscriptions::<P, Sub, Fol, Acc, Ses>),
        )
        .route(
            "/subscriptions/:planId",
            post(subscriptions::subscribe::<P, Sub, Fol, Acc, Ses>),
        )
        // Feed route
        .route("/feed", get(feed::feed::<P, Sub, Fol, Acc, Ses>))
        // Trainer routes
        .route(
            "/trainers",
            get(trainers::list_trainers::<P, Sub, Fol, Acc, Ses>),
        )
        .route(
            "/trainers/following/list",
            get(trainers::following_list::<P, Sub, Fol, Acc, Ses>),
        )
        .route(
            "/trainers/:id",
            get(trainers::trainer_profile::<P, Sub, Fol, Acc, Ses>),
        )
        .route(
            "/trainers/:id/follow",
            post(trainers::follow_trainer::<P, Sub, Fol, Acc, Ses>)
                .delete(trainers::unfollow_trainer::<P, Sub, Fol, Acc, Ses>),
        )
        // Health route
        .route("/health", get(health::health_check))
        .with_state(state)
}
