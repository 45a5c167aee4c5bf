use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Reference to the single item a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRef {
    Reminder(Uuid),
    Subscription(Uuid),
}

impl ItemRef {
    pub fn reminder_id(&self) -> Option<Uuid> {
        match self {
            ItemRef::Reminder(id) => Some(*id),
            ItemRef::Subscription(_) => None,
        }
    }

    pub fn subscription_id(&self) -> Option<Uuid> {
        match self {
            ItemRef::Reminder(_) => None,
            ItemRef::Subscription(id) => Some(*id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    ReminderDueTomorrow,
    SubscriptionDueTomorrow,
    Manual,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::ReminderDueTomorrow => "reminder_due_tomorrow",
            NotificationType::SubscriptionDueTomorrow => "subscription_due_tomorrow",
            NotificationType::Manual => "manual",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row in the notification log. Doubles as the deduplication record: a row
/// for (owner, item, type, window day) means that notification is spoken for.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EmailNotification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub reminder_id: Option<Uuid>,
    pub subscription_id: Option<Uuid>,
    pub notification_type: String,
    pub window_date: NaiveDate,
    pub status: String,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl EmailNotification {
    pub fn references(&self, item: &ItemRef) -> bool {
        match item {
            ItemRef::Reminder(id) => self.reminder_id == Some(*id),
            ItemRef::Subscription(id) => self.subscription_id == Some(*id),
        }
    }
}
