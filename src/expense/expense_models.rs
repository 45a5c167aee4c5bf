use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub payment_method: String,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-category total used by the spending breakdown chart.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}
