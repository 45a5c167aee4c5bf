use axum::{
    extract::State,
    http::HeaderMap,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use super::eligibility::Candidate;
use super::notification_dto::{
    RunBatchResponse, SendKind, SendNotificationRequest, SendNotificationResponse,
};
use super::notification_models::EmailNotification;
use crate::{
    error::{AppError, Result},
    state::{AppDispatcher, AppState},
};

fn dispatcher(state: &AppState) -> Result<&AppDispatcher> {
    state
        .dispatcher
        .as_deref()
        .ok_or_else(|| AppError::Config("RESEND_API_KEY is not configured".to_string()))
}

/// Get the notification log for the authenticated user
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Notification log, newest first", body = Vec<EmailNotification>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn get_notifications(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<Vec<EmailNotification>>> {
    let notifications = state
        .notification_repository
        .find_all_by_user(user_id)
        .await?;

    Ok(Json(notifications))
}

/// Send a notification email for one item right now
#[utoipa::path(
    post,
    path = "/api/notifications/send",
    request_body = SendNotificationRequest,
    responses(
        (status = 200, description = "Email sent", body = SendNotificationResponse),
        (status = 404, description = "Item not found"),
        (status = 502, description = "Email provider failure"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn send_notification(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<SendNotificationRequest>,
) -> Result<Json<SendNotificationResponse>> {
    let dispatcher = dispatcher(&state)?;

    match payload.kind {
        SendKind::Reminder => {
            let reminder = state
                .reminder_repository
                .find_by_id(payload.id, user_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Reminder not found".to_string()))?;
            dispatcher
                .send_immediate(&Candidate::Reminder(&reminder))
                .await?;
        }
        SendKind::Subscription => {
            let subscription = state
                .subscription_repository
                .find_by_id(payload.id, user_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Subscription not found".to_string()))?;
            dispatcher
                .send_immediate(&Candidate::Subscription(&subscription))
                .await?;
        }
    }

    Ok(Json(SendNotificationResponse {
        success: true,
        message: "Email notification sent".to_string(),
    }))
}

/// Run the "due tomorrow" notification batch
///
/// Intended for external schedulers; when `CRON_SECRET` is configured the
/// caller must present it in the `x-cron-secret` header.
#[utoipa::path(
    post,
    path = "/api/notifications/run",
    responses(
        (status = 200, description = "Batch summary", body = RunBatchResponse),
        (status = 401, description = "Missing or wrong scheduler secret"),
        (status = 500, description = "Batch aborted")
    ),
    tag = "notifications"
)]
pub async fn run_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RunBatchResponse>> {
    if let Some(secret) = state.config.cron_secret.as_deref() {
        let presented = headers
            .get("x-cron-secret")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if presented != secret {
            return Err(AppError::Unauthorized("Invalid scheduler secret".to_string()));
        }
    }

    let summary = dispatcher(&state)?.run_batch(Utc::now()).await?;

    Ok(Json(RunBatchResponse {
        success: true,
        message: format!(
            "Processed {} reminders and {} subscriptions",
            summary.reminders.attempted, summary.subscriptions.attempted
        ),
        data: summary,
    }))
}
