use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::reminder_models::Reminder;
use crate::error::Result;

#[derive(Clone)]
pub struct ReminderRepository {
    pool: PgPool,
}

impl ReminderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders WHERE user_id = $1 ORDER BY due_date ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders)
    }

    pub async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Reminder>> {
        let reminder = sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        user_id: Uuid,
        title: &str,
        amount: f64,
        due_date: DateTime<Utc>,
        category: &str,
        priority: &str,
        recurring: bool,
    ) -> Result<Reminder> {
        let reminder = sqlx::query_as::<_, Reminder>(
            "INSERT INTO reminders (user_id, title, amount, due_date, category, priority, recurring)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(user_id)
        .bind(title)
        .bind(amount)
        .bind(due_date)
        .bind(category)
        .bind(priority)
        .bind(recurring)
        .fetch_one(&self.pool)
        .await?;

        Ok(reminder)
    }

    pub async fn mark_paid(&self, id: Uuid, user_id: Uuid) -> Result<Option<Reminder>> {
        let reminder = sqlx::query_as::<_, Reminder>(
            "UPDATE reminders SET paid = TRUE WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder)
    }

    /// Pushes the due date back by exactly one day.
    pub async fn snooze(&self, id: Uuid, user_id: Uuid) -> Result<Option<Reminder>> {
        let reminder = sqlx::query_as::<_, Reminder>(
            "UPDATE reminders SET due_date = due_date + INTERVAL '1 day'
             WHERE id = $1 AND user_id = $2
             RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM reminders WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn find_upcoming(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders
             WHERE user_id = $1 AND paid = FALSE AND due_date >= $2 AND due_date <= $3
             ORDER BY due_date ASC",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders)
    }

    /// Unpaid reminders due inside the window, across all owners. Batch-only;
    /// user-facing queries are scoped by user id.
    pub async fn find_due_between(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders
             WHERE paid = FALSE AND due_date >= $1 AND due_date <= $2
             ORDER BY due_date ASC",
        )
        .bind(window_start)
        .bind(window_end)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders)
    }
}
