use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use super::notification_models::{EmailNotification, ItemRef, NotificationType};
use crate::error::Result;

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<EmailNotification>> {
        let notifications = sqlx::query_as::<_, EmailNotification>(
            "SELECT * FROM email_notifications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    pub async fn find_for_item(
        &self,
        item: &ItemRef,
        notification_type: NotificationType,
    ) -> Result<Vec<EmailNotification>> {
        let query = match item {
            ItemRef::Reminder(_) => {
                "SELECT * FROM email_notifications
                 WHERE reminder_id = $1 AND notification_type = $2"
            }
            ItemRef::Subscription(_) => {
                "SELECT * FROM email_notifications
                 WHERE subscription_id = $1 AND notification_type = $2"
            }
        };

        let id = match item {
            ItemRef::Reminder(id) | ItemRef::Subscription(id) => *id,
        };

        let notifications = sqlx::query_as::<_, EmailNotification>(query)
            .bind(id)
            .bind(notification_type.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(notifications)
    }

    /// Insert a pending log row for (owner, item, type, window day). Returns
    /// `None` when the row already exists; the unique indexes arbitrate
    /// between concurrent batch runs.
    pub async fn claim(
        &self,
        user_id: Uuid,
        item: &ItemRef,
        notification_type: NotificationType,
        window_date: NaiveDate,
    ) -> Result<Option<Uuid>> {
        let claimed = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO email_notifications
                 (user_id, reminder_id, subscription_id, notification_type, window_date)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT DO NOTHING
             RETURNING id",
        )
        .bind(user_id)
        .bind(item.reminder_id())
        .bind(item.subscription_id())
        .bind(notification_type.as_str())
        .bind(window_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(claimed)
    }

    pub async fn mark_sent(&self, id: Uuid) -> Result<()> {
        sqlx::query(
            "UPDATE email_notifications SET status = 'sent', sent_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Drop an unsent claim so the next scheduled run can retry the item.
    pub async fn release(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM email_notifications WHERE id = $1 AND status = 'pending'")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
