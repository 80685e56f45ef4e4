//! Personalized feed handler.

use crate::error::AppError;
use crate::extractors::Bearer;
use crate::state::AppState;
use axum::{extract::State, Json};
use stride_core::providers::{
    AccountStore, FollowStore, PlanStore, SessionStore, SubscriptionStore,
};
use stride_core::FeedItem;

/// The viewer's feed: followed trainers' plans, newest first, each
/// projected through the entitlement engine and annotated with the
/// viewer's subscription state.
///
/// # Endpoint
///
/// ```text
/// GET /feed
/// Authorization: Bearer <token>
/// ```
pub async fn feed<P, Sub, Fol, Acc, Ses>(
    State(state): State<AppState<P, Sub, Fol, Acc, Ses>>,
    Bearer(token): Bearer,
) -> Result<Json<Vec<FeedItem>>, AppError>
where
    P: PlanStore + Clone + 'static,
    Sub: SubscriptionStore + Clone + 'static,
    Fol: FollowStore + Clone + 'static,
    Acc: AccountStore + Clone + 'static,
    Ses: SessionStore + Clone + 'static,
{
    let viewer = state.identity.resolve(token.as_deref()).await;
    viewer.require_authenticated()?;

    let items = state.feed.compose(&viewer).await?;
    Ok(Json(items))
}
