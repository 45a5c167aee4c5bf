use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use super::subscription_dto::{CreateSubscriptionRequest, SubscriptionSummary};
use super::subscription_models::Subscription;
use crate::{
    error::{AppError, Result},
    state::AppState,
};

/// Get all subscriptions for the authenticated user
#[utoipa::path(
    get,
    path = "/api/subscriptions",
    responses(
        (status = 200, description = "List of subscriptions sorted by next billing date", body = Vec<Subscription>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "subscriptions",
    security(("bearer_auth" = []))
)]
pub async fn get_subscriptions(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<Vec<Subscription>>> {
    let subscriptions = state.subscription_service.list_subscriptions(user_id).await?;

    Ok(Json(subscriptions))
}

/// Create a new subscription
#[utoipa::path(
    post,
    path = "/api/subscriptions",
    request_body = CreateSubscriptionRequest,
    responses(
        (status = 201, description = "Subscription created", body = Subscription),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "subscriptions",
    security(("bearer_auth" = []))
)]
pub async fn create_subscription(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<CreateSubscriptionRequest>,
) -> Result<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let subscription = state
        .subscription_service
        .create_subscription(user_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(subscription)))
}

/// Cancel a subscription
#[utoipa::path(
    patch,
    path = "/api/subscriptions/{id}/cancel",
    params(
        ("id" = Uuid, Path, description = "Subscription ID")
    ),
    responses(
        (status = 200, description = "Subscription cancelled", body = Subscription),
        (status = 404, description = "Subscription not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "subscriptions",
    security(("bearer_auth" = []))
)]
pub async fn cancel_subscription(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(subscription_id): Path<Uuid>,
) -> Result<Json<Subscription>> {
    let subscription = state
        .subscription_service
        .cancel_subscription(user_id, subscription_id)
        .await?;

    Ok(Json(subscription))
}

/// Delete a subscription
#[utoipa::path(
    delete,
    path = "/api/subscriptions/{id}",
    params(
        ("id" = Uuid, Path, description = "Subscription ID")
    ),
    responses(
        (status = 204, description = "Subscription deleted"),
        (status = 404, description = "Subscription not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "subscriptions",
    security(("bearer_auth" = []))
)]
pub async fn delete_subscription(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(subscription_id): Path<Uuid>,
) -> Result<StatusCode> {
    let deleted = state
        .subscription_service
        .delete_subscription(user_id, subscription_id)
        .await?;

    if deleted == 0 {
        return Err(AppError::NotFound("Subscription not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Aggregate cost summary over active subscriptions
#[utoipa::path(
    get,
    path = "/api/subscriptions/summary",
    responses(
        (status = 200, description = "Monthly-normalized cost totals", body = SubscriptionSummary),
        (status = 401, description = "Unauthorized")
    ),
    tag = "subscriptions",
    security(("bearer_auth" = []))
)]
pub async fn get_subscription_summary(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<SubscriptionSummary>> {
    let summary = state.subscription_service.summary(user_id).await?;

    Ok(Json(summary))
}
