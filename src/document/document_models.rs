use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Metadata row for an uploaded financial document. The blob itself lives in
/// the external object store; `file_path` is its key there.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FinancialDocument {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub subscription_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
