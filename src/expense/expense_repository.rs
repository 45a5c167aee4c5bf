use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::expense_models::{CategoryTotal, Expense};
use crate::error::Result;

#[derive(Clone)]
pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(
            "SELECT * FROM expenses WHERE user_id = $1 ORDER BY date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        title: &str,
        amount: f64,
        category: &str,
        payment_method: &str,
        date: DateTime<Utc>,
        notes: Option<&str>,
    ) -> Result<Expense> {
        let expense = sqlx::query_as::<_, Expense>(
            "INSERT INTO expenses (user_id, title, amount, category, payment_method, date, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(user_id)
        .bind(title)
        .bind(amount)
        .bind(category)
        .bind(payment_method)
        .bind(date)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn totals_by_category(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<CategoryTotal>> {
        let totals = sqlx::query_as::<_, CategoryTotal>(
            "SELECT category, SUM(amount) AS total
             FROM expenses
             WHERE user_id = $1 AND date >= $2 AND date < $3
             GROUP BY category
             ORDER BY total DESC",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(totals)
    }
}
