use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::billing::BillingCycle;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubscriptionRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub amount: f64,
    pub billing_cycle: BillingCycle,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    pub start_date: DateTime<Utc>,
    pub next_billing_date: DateTime<Utc>,
    #[validate(url)]
    pub website: Option<String>,
}

/// Aggregate cost view over the user's active subscriptions.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubscriptionSummary {
    pub active_count: usize,
    pub monthly_total: f64,
    pub yearly_total: f64,
}
