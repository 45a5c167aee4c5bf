use axum::{extract::State, Extension, Json};
use uuid::Uuid;

use super::user_dto::UpdateNotificationPreferencesRequest;
use super::user_models::UserResponse;
use crate::{
    error::{AppError, Result},
    state::AppState,
};

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn get_me(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<UserResponse>> {
    let user = state
        .user_repository
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// Toggle email notifications for the authenticated user
#[utoipa::path(
    put,
    path = "/api/users/me/preferences",
    request_body = UpdateNotificationPreferencesRequest,
    responses(
        (status = 200, description = "Preferences updated", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn update_notification_preferences(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<UpdateNotificationPreferencesRequest>,
) -> Result<Json<UserResponse>> {
    let user = state
        .user_repository
        .update_notification_enabled(user_id, payload.notification_enabled)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}
