use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDocumentRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[validate(length(min = 1, max = 512))]
    pub file_name: String,
    #[validate(length(min = 1, max = 1024))]
    pub file_path: String,
    #[validate(length(min = 1, max = 100))]
    pub file_type: String,
    pub subscription_id: Option<Uuid>,
}

fn default_category() -> String {
    "other".to_string()
}
