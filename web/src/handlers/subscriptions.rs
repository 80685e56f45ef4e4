//! Subscription handlers.

use crate::error::AppError;
use crate::extractors::Bearer;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use stride_core::providers::{
    AccountStore, FollowStore, PlanStore, SessionStore, SubscriptionStore,
};
use stride_core::{PlanId, SubscriptionView};

/// Subscribe the viewer to a plan.
///
/// Creates a fresh record (201) or reactivates a lapsed one in place (200).
/// A live subscription for the same pair answers 400.
///
/// # Endpoint
///
/// ```text
/// POST /subscriptions/:planId
/// Authorization: Bearer <token>
/// ```
pub async fn subscribe<P, Sub, Fol, Acc, Ses>(
    State(state): State<AppState<P, Sub, Fol, Acc, Ses>>,
    Path(plan_id): Path<uuid::Uuid>,
    Bearer(token): Bearer,
) -> Result<(StatusCode, Json<SubscriptionView>), AppError>
where
    P: PlanStore + Clone + 'static,
    Sub: SubscriptionStore + Clone + 'static,
    Fol: FollowStore + Clone + 'static,
    Acc: AccountStore + Clone + 'static,
    Ses: SessionStore + Clone + 'static,
{
    let viewer = state.identity.resolve(token.as_deref()).await;
    let user_id = viewer.require_authenticated()?;

    let outcome = state.ledger.subscribe(user_id, PlanId(plan_id)).await?;
    let status = if outcome.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(outcome.view().clone())))
}

/// The viewer's live subscriptions, most recent purchase first.
///
/// # Endpoint
///
/// ```text
/// GET /subscriptions/my-subscriptions
/// Authorization: Bearer <token>
/// ```
pub async fn my_subscriptions<P, Sub, Fol, Acc, Ses>(
    State(state): State<AppState<P, Sub, Fol, Acc, Ses>>,
    Bearer(token): Bearer,
) -> Result<Json<Vec<SubscriptionView>>, AppError>
where
    P: PlanStore + Clone + 'static,
    Sub: SubscriptionStore + Clone + 'static,
    Fol: FollowStore + Clone + 'static,
    Acc: AccountStore + Clone + 'static,
    Ses: SessionStore + Clone + 'static,
{
    let viewer = state.identity.resolve(token.as_deref()).await;
    let user_id = viewer.require_authenticated()?;

    let views = state.ledger.list_for_user(user_id).await?;
    Ok(Json(views))
}
