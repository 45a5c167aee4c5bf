use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use super::document_dto::CreateDocumentRequest;
use super::document_models::FinancialDocument;
use crate::{
    error::{AppError, Result},
    state::AppState,
};

/// Get all document metadata for the authenticated user
#[utoipa::path(
    get,
    path = "/api/documents",
    responses(
        (status = 200, description = "List of document metadata, newest first", body = Vec<FinancialDocument>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn get_documents(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<Vec<FinancialDocument>>> {
    let documents = state.document_repository.find_all_by_user(user_id).await?;

    Ok(Json(documents))
}

/// Register metadata for an uploaded document
#[utoipa::path(
    post,
    path = "/api/documents",
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document metadata stored", body = FinancialDocument),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn create_document(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<CreateDocumentRequest>,
) -> Result<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let document = state
        .document_repository
        .create(
            user_id,
            &payload.title,
            payload.description.as_deref(),
            &payload.category,
            &payload.file_name,
            &payload.file_path,
            &payload.file_type,
            payload.subscription_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(document)))
}

/// Delete document metadata
#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    params(
        ("id" = Uuid, Path, description = "Document ID")
    ),
    responses(
        (status = 204, description = "Document metadata deleted"),
        (status = 404, description = "Document not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "documents",
    security(("bearer_auth" = []))
)]
pub async fn delete_document(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(document_id): Path<Uuid>,
) -> Result<StatusCode> {
    let deleted = state
        .document_repository
        .delete(document_id, user_id)
        .await?;

    if deleted == 0 {
        return Err(AppError::NotFound("Document not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
