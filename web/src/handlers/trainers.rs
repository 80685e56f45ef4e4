//! Trainer directory, profile and follow handlers.

use crate::error::AppError;
use crate::extractors::Bearer;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use stride_core::providers::{
    AccountStore, FollowStore, PlanStore, SessionStore, SubscriptionStore,
};
use stride_core::{Follow, FollowedTrainer, TrainerListing, TrainerProfile, UserId};

/// Response after following a trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The created edge.
    pub follow: Follow,
}

/// List all trainers.
///
/// # Endpoint
///
/// ```text
/// GET /trainers
/// ```
pub async fn list_trainers<P, Sub, Fol, Acc, Ses>(
    State(state): State<AppState<P, Sub, Fol, Acc, Ses>>,
) -> Result<Json<Vec<TrainerListing>>, AppError>
where
    P: PlanStore + Clone + 'static,
    Sub: SubscriptionStore + Clone + 'static,
    Fol: FollowStore + Clone + 'static,
    Acc: AccountStore + Clone + 'static,
    Ses: SessionStore + Clone + 'static,
{
    let trainers = state.catalog.list_trainers().await?;
    Ok(Json(trainers))
}

/// A trainer's profile: the trainer, their plans shaped for the viewer,
/// and whether the viewer follows them.
///
/// # Endpoint
///
/// ```text
/// GET /trainers/:id
/// Authorization: Bearer <token>   (optional)
/// ```
pub async fn trainer_profile<P, Sub, Fol, Acc, Ses>(
    State(state): State<AppState<P, Sub, Fol, Acc, Ses>>,
    Path(trainer_id): Path<uuid::Uuid>,
    Bearer(token): Bearer,
) -> Result<Json<TrainerProfile>, AppError>
where
    P: PlanStore + Clone + 'static,
    Sub: SubscriptionStore + Clone + 'static,
    Fol: FollowStore + Clone + 'static,
    Acc: AccountStore + Clone + 'static,
    Ses: SessionStore + Clone + 'static,
{
    let viewer = state.identity.resolve(token.as_deref()).await;
    let profile = state
        .catalog
        .trainer_profile(&viewer, UserId(trainer_id))
        .await?;
    Ok(Json(profile))
}

/// Follow a trainer.
///
/// # Endpoint
///
/// ```text
/// POST /trainers/:id/follow
/// Authorization: Bearer <token>
/// ```
pub async fn follow_trainer<P, Sub, Fol, Acc, Ses>(
    State(state): State<AppState<P, Sub, Fol, Acc, Ses>>,
    Path(trainer_id): Path<uuid::Uuid>,
    Bearer(token): Bearer,
) -> Result<Json<FollowResponse>, AppError>
where
    P: PlanStore + Clone + 'static,
    Sub: SubscriptionStore + Clone + 'static,
    Fol: FollowStore + Clone + 'static,
    Acc: AccountStore + Clone + 'static,
    Ses: SessionStore + Clone + 'static,
{
    let viewer = state.identity.resolve(token.as_deref()).await;
    let user_id = viewer.require_authenticated()?;

    let follow = state.graph.follow(user_id, UserId(trainer_id)).await?;
    Ok(Json(FollowResponse {
        message: "Followed successfully".to_string(),
        follow,
    }))
}

/// Unfollow a trainer.
///
/// # Endpoint
///
/// ```text
/// DELETE /trainers/:id/follow
/// Authorization: Bearer <token>
/// ```
pub async fn unfollow_trainer<P, Sub, Fol, Acc, Ses>(
    State(state): State<AppState<P, Sub, Fol, Acc, Ses>>,
    Path(trainer_id): Path<uuid::Uuid>,
    Bearer(token): Bearer,
) -> Result<Json<MessageResponse>, AppError>
where
    P: PlanStore + Clone + 'static,
    Sub: SubscriptionStore + Clone + 'static,
    Fol: FollowStore + Clone + 'static,
    Acc: AccountStore + Clone + 'static,
    Ses: SessionStore + Clone + 'static,
{
    let viewer = state.identity.resolve(token.as_deref()).await;
    let user_id = viewer.require_authenticated()?;

    state.graph.unfollow(user_id, UserId(trainer_id)).await?;
    Ok(Json(MessageResponse::new("Unfollowed successfully")))
}

/// The viewer's following list, most recent first.
///
/// # Endpoint
///
/// ```text
/// GET /trainers/following/list
/// Authorization: Bearer <token>
/// ```
pub async fn following_list<P, Sub, Fol, Acc, Ses>(
    State(state): State<AppState<P, Sub, Fol, Acc, Ses>>,
    Bearer(token): Bearer,
) -> Result<Json<Vec<FollowedTrainer>>, AppError>
where
    P: PlanStore + Clone + 'static,
    Sub: SubscriptionStore + Clone + 'static,
    Fol: FollowStore + Clone + 'static,
    Acc: AccountStore + Clone + 'static,
    Ses: SessionStore + Clone + 'static,
{
    let viewer = state.identity.resolve(token.as_deref()).await;
    let user_id = viewer.require_authenticated()?;

    let list = state.graph.following(user_id).await?;
    Ok(Json(list))
}
