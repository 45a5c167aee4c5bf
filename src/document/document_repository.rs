use sqlx::PgPool;
use uuid::Uuid;

use super::document_models::FinancialDocument;
use crate::error::Result;

#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<FinancialDocument>> {
        let documents = sqlx::query_as::<_, FinancialDocument>(
            "SELECT * FROM financial_documents WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        user_id: Uuid,
        title: &str,
        description: Option<&str>,
        category: &str,
        file_name: &str,
        file_path: &str,
        file_type: &str,
        subscription_id: Option<Uuid>,
    ) -> Result<FinancialDocument> {
        let document = sqlx::query_as::<_, FinancialDocument>(
            "INSERT INTO financial_documents
                 (user_id, title, description, category, file_name, file_path, file_type, subscription_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(file_name)
        .bind(file_path)
        .bind(file_type)
        .bind(subscription_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM financial_documents WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }
}
