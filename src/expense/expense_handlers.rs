use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::{Datelike, Months, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;
use validator::Validate;

use super::expense_dto::{CreateExpenseRequest, ExpenseSummaryQuery};
use super::expense_models::{CategoryTotal, Expense};
use crate::{
    error::{AppError, Result},
    state::AppState,
};

/// Get all expenses for the authenticated user
#[utoipa::path(
    get,
    path = "/api/expenses",
    responses(
        (status = 200, description = "List of expenses, newest first", body = Vec<Expense>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "expenses",
    security(("bearer_auth" = []))
)]
pub async fn get_expenses(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<Vec<Expense>>> {
    let expenses = state.expense_repository.find_all_by_user(user_id).await?;

    Ok(Json(expenses))
}

/// Log a new expense
#[utoipa::path(
    post,
    path = "/api/expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense logged", body = Expense),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "expenses",
    security(("bearer_auth" = []))
)]
pub async fn create_expense(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let expense = state
        .expense_repository
        .create(
            user_id,
            &payload.title,
            payload.amount,
            &payload.category,
            &payload.payment_method,
            payload.date,
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

/// Delete an expense
#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    params(
        ("id" = Uuid, Path, description = "Expense ID")
    ),
    responses(
        (status = 204, description = "Expense deleted"),
        (status = 404, description = "Expense not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "expenses",
    security(("bearer_auth" = []))
)]
pub async fn delete_expense(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(expense_id): Path<Uuid>,
) -> Result<StatusCode> {
    let deleted = state.expense_repository.delete(expense_id, user_id).await?;

    if deleted == 0 {
        return Err(AppError::NotFound("Expense not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Per-category spending totals for a month
#[utoipa::path(
    get,
    path = "/api/expenses/summary",
    params(
        ("month" = Option<String>, Query, description = "Month as YYYY-MM, defaults to the current month")
    ),
    responses(
        (status = 200, description = "Category totals", body = Vec<CategoryTotal>),
        (status = 400, description = "Malformed month"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "expenses",
    security(("bearer_auth" = []))
)]
pub async fn get_expense_summary(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Query(query): Query<ExpenseSummaryQuery>,
) -> Result<Json<Vec<CategoryTotal>>> {
    let first_of_month = match query.month.as_deref() {
        Some(month) => NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
            .map_err(|_| AppError::BadRequest("month must be formatted as YYYY-MM".to_string()))?,
        None => {
            let today = Utc::now().date_naive();
            today.with_day(1).unwrap_or(today)
        }
    };

    let from = first_of_month.and_time(NaiveTime::MIN).and_utc();
    let to = first_of_month
        .checked_add_months(Months::new(1))
        .unwrap_or(first_of_month)
        .and_time(NaiveTime::MIN)
        .and_utc();

    let totals = state
        .expense_repository
        .totals_by_category(user_id, from, to)
        .await?;

    Ok(Json(totals))
}
