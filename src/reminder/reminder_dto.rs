use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::reminder_models::{Reminder, ReminderCategory, ReminderPriority};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReminderRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(range(min = 0.0))]
    pub amount: f64,
    pub due_date: DateTime<Utc>,
    pub category: ReminderCategory,
    pub priority: ReminderPriority,
    #[serde(default)]
    pub recurring: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpcomingQuery {
    /// Lookahead in days, defaults to 7.
    pub days: Option<i64>,
}

/// Upcoming reminder annotated with the dashboard's countdown fields.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpcomingReminder {
    #[serde(flatten)]
    pub reminder: Reminder,
    pub days_left: i64,
    pub time_remaining: String,
}
