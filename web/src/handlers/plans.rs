//! Plan catalog handlers.
//!
//! Read surfaces are public with per-viewer projection; mutations require
//! the trainer role and plan ownership.

use crate::error::AppError;
use crate::extractors::Bearer;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use stride_core::providers::{
    AccountStore, FollowStore, PlanStore, SessionStore, SubscriptionStore,
};
use stride_core::{NewPlan, PlanId, PlanPatch, PlanRecord, PlanView, PlatformError};

/// Request to create a plan.
///
/// Fields are optional at the wire level so a missing field surfaces as a
/// 400 validation error with field context, not a body-parse rejection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequest {
    /// Plan title.
    pub title: Option<String>,
    /// Full description.
    pub description: Option<String>,
    /// Price.
    pub price: Option<f64>,
    /// Access window in days.
    #[serde(rename = "duration")]
    pub duration_days: Option<i64>,
}

/// Request to partially update a plan. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanRequest {
    /// New title, if supplied.
    pub title: Option<String>,
    /// New description, if supplied.
    pub description: Option<String>,
    /// New price, if supplied. Zero is a value, not an omission.
    pub price: Option<f64>,
    /// New access window in days, if supplied.
    #[serde(rename = "duration")]
    pub duration_days: Option<i64>,
}

fn require<T>(field: &'static str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| PlatformError::validation(field, "is required").into())
}

/// List all plans, shaped for the (possibly anonymous) viewer.
///
/// # Endpoint
///
/// ```text
/// GET /plans
/// Authorization: Bearer <token>   (optional)
/// ```
pub async fn list_plans<P, Sub, Fol, Acc, Ses>(
    State(state): State<AppState<P, Sub, Fol, Acc, Ses>>,
    Bearer(token): Bearer,
) -> Result<Json<Vec<PlanView>>, AppError>
where
    P: PlanStore + Clone + 'static,
    Sub: SubscriptionStore + Clone + 'static,
    Fol: FollowStore + Clone + 'static,
    Acc: AccountStore + Clone + 'static,
    Ses: SessionStore + Clone + 'static,
{
    let viewer = state.identity.resolve(token.as_deref()).await;
    let views = state.catalog.list(&viewer).await?;
    Ok(Json(views))
}

/// Fetch one plan, shaped for the viewer.
///
/// # Endpoint
///
/// ```text
/// GET /plans/:id
/// Authorization: Bearer <token>   (optional)
/// ```
pub async fn get_plan<P, Sub, Fol, Acc, Ses>(
    State(state): State<AppState<P, Sub, Fol, Acc, Ses>>,
    Path(plan_id): Path<uuid::Uuid>,
    Bearer(token): Bearer,
) -> Result<Json<PlanView>, AppError>
where
    P: PlanStore + Clone + 'static,
    Sub: SubscriptionStore + Clone + 'static,
    Fol: FollowStore + Clone + 'static,
    Acc: AccountStore + Clone + 'static,
    Ses: SessionStore + Clone + 'static,
{
    let viewer = state.identity.resolve(token.as_deref()).await;
    let view = state.catalog.get(&viewer, PlanId(plan_id)).await?;
    Ok(Json(view))
}

/// Create a plan (trainer only).
///
/// # Endpoint
///
/// ```text
/// POST /plans
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {"title": "...", "description": "...", "price": 20, "duration": 30}
/// ```
pub async fn create_plan<P, Sub, Fol, Acc, Ses>(
    State(state): State<AppState<P, Sub, Fol, Acc, Ses>>,
    Bearer(token): Bearer,
    Json(request): Json<CreatePlanRequest>,
) -> Result<(StatusCode, Json<PlanRecord>), AppError>
where
    P: PlanStore + Clone + 'static,
    Sub: SubscriptionStore + Clone + 'static,
    Fol: FollowStore + Clone + 'static,
    Acc: AccountStore + Clone + 'static,
    Ses: SessionStore + Clone + 'static,
{
    let viewer = state.identity.resolve(token.as_deref()).await;
    let trainer_id = viewer.require_trainer()?;

    let new_plan = NewPlan {
        title: require("title", request.title)?,
        description: require("description", request.description)?,
        price: require("price", request.price)?,
        duration_days: require("duration", request.duration_days)?,
    };

    let record = state.catalog.create(trainer_id, new_plan).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Update a plan (trainer only, own plans).
///
/// # Endpoint
///
/// ```text
/// PUT /plans/:id
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {"price": 0}
/// ```
pub async fn update_plan<P, Sub, Fol, Acc, Ses>(
    State(state): State<AppState<P, Sub, Fol, Acc, Ses>>,
    Path(plan_id): Path<uuid::Uuid>,
    Bearer(token): Bearer,
    Json(request): Json<UpdatePlanRequest>,
) -> Result<Json<PlanRecord>, AppError>
where
    P: PlanStore + Clone + 'static,
    Sub: SubscriptionStore + Clone + 'static,
    Fol: FollowStore + Clone + 'static,
    Acc: AccountStore + Clone + 'static,
    Ses: SessionStore + Clone + 'static,
{
    let viewer = state.identity.resolve(token.as_deref()).await;
    let trainer_id = viewer.require_trainer()?;

    let patch = PlanPatch {
        title: request.title,
        description: request.description,
        price: request.price,
        duration_days: request.duration_days,
    };

    let record = state.catalog.update(trainer_id, PlanId(plan_id), patch).await?;
    Ok(Json(record))
}

/// Delete a plan (trainer only, own plans). Cascades subscription cleanup.
///
/// # Endpoint
///
/// ```text
/// DELETE /plans/:id
/// Authorization: Bearer <token>
/// ```
pub async fn delete_plan<P, Sub, Fol, Acc, Ses>(
    State(state): State<AppState<P, Sub, Fol, Acc, Ses>>,
    Path(plan_id): Path<uuid::Uuid>,
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
    let trainer_id = viewer.require_trainer()?;

    state.catalog.delete(trainer_id, PlanId(plan_id)).await?;
    Ok(Json(MessageResponse::new("Plan deleted successfully")))
}
