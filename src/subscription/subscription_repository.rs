use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::subscription_models::Subscription;
use crate::error::Result;

#[derive(Clone)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<Subscription>> {
        let subscriptions = sqlx::query_as::<_, Subscription>(
            "SELECT * FROM subscriptions WHERE user_id = $1 ORDER BY next_billing_date ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(subscriptions)
    }

    pub async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Subscription>> {
        let subscription = sqlx::query_as::<_, Subscription>(
            "SELECT * FROM subscriptions WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subscription)
    }

    pub async fn find_active_by_user(&self, user_id: Uuid) -> Result<Vec<Subscription>> {
        let subscriptions = sqlx::query_as::<_, Subscription>(
            "SELECT * FROM subscriptions WHERE user_id = $1 AND active = TRUE
             ORDER BY next_billing_date ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(subscriptions)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        user_id: Uuid,
        name: &str,
        amount: f64,
        billing_cycle: &str,
        category: &str,
        start_date: DateTime<Utc>,
        next_billing_date: DateTime<Utc>,
        website: Option<&str>,
    ) -> Result<Subscription> {
        let subscription = sqlx::query_as::<_, Subscription>(
            "INSERT INTO subscriptions
                 (user_id, name, amount, billing_cycle, category, start_date, next_billing_date, website)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(user_id)
        .bind(name)
        .bind(amount)
        .bind(billing_cycle)
        .bind(category)
        .bind(start_date)
        .bind(next_billing_date)
        .bind(website)
        .fetch_one(&self.pool)
        .await?;

        Ok(subscription)
    }

    /// Cancellation is one-way; there is no reactivation path.
    pub async fn cancel(&self, id: Uuid, user_id: Uuid) -> Result<Option<Subscription>> {
        let subscription = sqlx::query_as::<_, Subscription>(
            "UPDATE subscriptions SET active = FALSE WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subscription)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Active subscriptions renewing inside the window, across all owners.
    /// Batch-only; user-facing queries are scoped by user id.
    pub async fn find_due_between(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<Subscription>> {
        let subscriptions = sqlx::query_as::<_, Subscription>(
            "SELECT * FROM subscriptions
             WHERE active = TRUE AND next_billing_date >= $1 AND next_billing_date <= $2
             ORDER BY next_billing_date ASC",
        )
        .bind(window_start)
        .bind(window_end)
        .fetch_all(&self.pool)
        .await?;

        Ok(subscriptions)
    }

    pub async fn advance_billing_date(
        &self,
        id: Uuid,
        next_billing_date: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query("UPDATE subscriptions SET next_billing_date = $1 WHERE id = $2")
            .bind(next_billing_date)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
