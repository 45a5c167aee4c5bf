use uuid::Uuid;

use super::subscription_dto::{CreateSubscriptionRequest, SubscriptionSummary};
use super::subscription_models::Subscription;
use super::subscription_repository::SubscriptionRepository;
use crate::error::{AppError, Result};

/// Service layer for subscription business logic.
#[derive(Clone)]
pub struct SubscriptionService {
    repo: SubscriptionRepository,
}

impl SubscriptionService {
    pub fn new(repo: SubscriptionRepository) -> Self {
        Self { repo }
    }

    pub async fn list_subscriptions(&self, user_id: Uuid) -> Result<Vec<Subscription>> {
        self.repo.find_all_by_user(user_id).await
    }

    pub async fn create_subscription(
        &self,
        user_id: Uuid,
        payload: CreateSubscriptionRequest,
    ) -> Result<Subscription> {
        self.repo
            .create(
                user_id,
                &payload.name,
                payload.amount,
                payload.billing_cycle.as_str(),
                &payload.category,
                payload.start_date,
                payload.next_billing_date,
                payload.website.as_deref(),
            )
            .await
    }

    pub async fn cancel_subscription(
        &self,
        user_id: Uuid,
        subscription_id: Uuid,
    ) -> Result<Subscription> {
        self.repo
            .cancel(subscription_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Subscription not found".into()))
    }

    pub async fn delete_subscription(&self, user_id: Uuid, subscription_id: Uuid) -> Result<u64> {
        self.repo.delete(subscription_id, user_id).await
    }

    /// Active-subscription cost totals, normalized to a monthly basis.
    pub async fn summary(&self, user_id: Uuid) -> Result<SubscriptionSummary> {
        let active = self.repo.find_active_by_user(user_id).await?;
        let monthly_total: f64 = active.iter().map(|s| s.monthly_equivalent()).sum();

        Ok(SubscriptionSummary {
            active_count: active.len(),
            monthly_total,
            yearly_total: monthly_total * 12.0,
        })
    }
}
