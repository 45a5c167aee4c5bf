use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::dispatcher::BatchSummary;

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SendKind {
    Reminder,
    Subscription,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendNotificationRequest {
    pub kind: SendKind,
    pub id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SendNotificationResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RunBatchResponse {
    pub success: bool,
    pub message: String,
    pub data: BatchSummary,
}
