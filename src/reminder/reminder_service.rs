use chrono::{Duration, Utc};
use uuid::Uuid;

use super::reminder_dto::CreateReminderRequest;
use super::reminder_models::Reminder;
use super::reminder_repository::ReminderRepository;
use crate::error::{AppError, Result};

/// Service layer for reminder business logic.
#[derive(Clone)]
pub struct ReminderService {
    repo: ReminderRepository,
}

impl ReminderService {
    pub fn new(repo: ReminderRepository) -> Self {
        Self { repo }
    }

    pub async fn list_reminders(&self, user_id: Uuid) -> Result<Vec<Reminder>> {
        self.repo.find_all_by_user(user_id).await
    }

    pub async fn create_reminder(
        &self,
        user_id: Uuid,
        payload: CreateReminderRequest,
    ) -> Result<Reminder> {
        self.repo
            .create(
                user_id,
                &payload.title,
                payload.amount,
                payload.due_date,
                payload.category.as_str(),
                payload.priority.as_str(),
                payload.recurring,
            )
            .await
    }

    pub async fn mark_paid(&self, user_id: Uuid, reminder_id: Uuid) -> Result<Reminder> {
        self.repo
            .mark_paid(reminder_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reminder not found".into()))
    }

    pub async fn snooze(&self, user_id: Uuid, reminder_id: Uuid) -> Result<Reminder> {
        self.repo
            .snooze(reminder_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reminder not found".into()))
    }

    pub async fn delete_reminder(&self, user_id: Uuid, reminder_id: Uuid) -> Result<u64> {
        self.repo.delete(reminder_id, user_id).await
    }

    pub async fn upcoming_reminders(&self, user_id: Uuid, days: i64) -> Result<Vec<Reminder>> {
        let now = Utc::now();
        self.repo
            .find_upcoming(user_id, now, now + Duration::days(days))
            .await
    }
}
