use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use super::reminder_dto::{CreateReminderRequest, UpcomingQuery, UpcomingReminder};
use super::reminder_models::Reminder;
use crate::{
    billing,
    error::{AppError, Result},
    state::AppState,
};

/// Get all reminders for the authenticated user
#[utoipa::path(
    get,
    path = "/api/reminders",
    responses(
        (status = 200, description = "List of reminders sorted by due date", body = Vec<Reminder>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reminders",
    security(("bearer_auth" = []))
)]
pub async fn get_reminders(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<Vec<Reminder>>> {
    let reminders = state.reminder_service.list_reminders(user_id).await?;

    Ok(Json(reminders))
}

/// Create a new payment reminder
#[utoipa::path(
    post,
    path = "/api/reminders",
    request_body = CreateReminderRequest,
    responses(
        (status = 201, description = "Reminder created", body = Reminder),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reminders",
    security(("bearer_auth" = []))
)]
pub async fn create_reminder(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<CreateReminderRequest>,
) -> Result<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let reminder = state
        .reminder_service
        .create_reminder(user_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(reminder)))
}

/// Mark a reminder as paid
#[utoipa::path(
    patch,
    path = "/api/reminders/{id}/paid",
    params(
        ("id" = Uuid, Path, description = "Reminder ID")
    ),
    responses(
        (status = 200, description = "Reminder marked as paid", body = Reminder),
        (status = 404, description = "Reminder not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reminders",
    security(("bearer_auth" = []))
)]
pub async fn mark_reminder_paid(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(reminder_id): Path<Uuid>,
) -> Result<Json<Reminder>> {
    let reminder = state.reminder_service.mark_paid(user_id, reminder_id).await?;

    Ok(Json(reminder))
}

/// Snooze a reminder by one day
#[utoipa::path(
    patch,
    path = "/api/reminders/{id}/snooze",
    params(
        ("id" = Uuid, Path, description = "Reminder ID")
    ),
    responses(
        (status = 200, description = "Reminder snoozed by one day", body = Reminder),
        (status = 404, description = "Reminder not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reminders",
    security(("bearer_auth" = []))
)]
pub async fn snooze_reminder(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(reminder_id): Path<Uuid>,
) -> Result<Json<Reminder>> {
    let reminder = state.reminder_service.snooze(user_id, reminder_id).await?;

    Ok(Json(reminder))
}

/// Delete a reminder
#[utoipa::path(
    delete,
    path = "/api/reminders/{id}",
    params(
        ("id" = Uuid, Path, description = "Reminder ID")
    ),
    responses(
        (status = 204, description = "Reminder deleted"),
        (status = 404, description = "Reminder not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reminders",
    security(("bearer_auth" = []))
)]
pub async fn delete_reminder(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(reminder_id): Path<Uuid>,
) -> Result<StatusCode> {
    let deleted = state
        .reminder_service
        .delete_reminder(user_id, reminder_id)
        .await?;

    if deleted == 0 {
        return Err(AppError::NotFound("Reminder not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Get unpaid reminders due within the next days
#[utoipa::path(
    get,
    path = "/api/reminders/upcoming",
    params(
        ("days" = Option<i64>, Query, description = "Lookahead in days, defaults to 7")
    ),
    responses(
        (status = 200, description = "Upcoming unpaid reminders with countdown labels", body = Vec<UpcomingReminder>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reminders",
    security(("bearer_auth" = []))
)]
pub async fn get_upcoming_reminders(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Query(query): Query<UpcomingQuery>,
) -> Result<Json<Vec<UpcomingReminder>>> {
    let days = query.days.unwrap_or(7).clamp(1, 365);
    let reminders = state
        .reminder_service
        .upcoming_reminders(user_id, days)
        .await?;

    let now = chrono::Utc::now();
    let upcoming = reminders
        .into_iter()
        .map(|reminder| UpcomingReminder {
            days_left: billing::days_until(reminder.due_date, now),
            time_remaining: billing::time_remaining_label(reminder.due_date, now),
            reminder,
        })
        .collect();

    Ok(Json(upcoming))
}
