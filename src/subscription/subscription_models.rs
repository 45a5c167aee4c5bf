use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::billing;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub amount: f64,
    pub billing_cycle: String,
    pub category: String,
    pub start_date: DateTime<Utc>,
    pub next_billing_date: DateTime<Utc>,
    pub website: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    /// Cost normalized to a monthly basis for aggregate displays.
    pub fn monthly_equivalent(&self) -> f64 {
        billing::monthly_equivalent_of(self.amount, &self.billing_cycle)
    }

    pub fn cycle_label(&self) -> String {
        billing::cycle_label(&self.billing_cycle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn subscription(amount: f64, cycle: &str) -> Subscription {
        let date = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        Subscription {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Streaming".to_string(),
            amount,
            billing_cycle: cycle.to_string(),
            category: "entertainment".to_string(),
            start_date: date,
            next_billing_date: date,
            website: None,
            active: true,
            created_at: date,
        }
    }

    #[test]
    fn test_monthly_equivalent_uses_cycle() {
        assert_eq!(subscription(1200.0, "yearly").monthly_equivalent(), 100.0);
        assert_eq!(subscription(100.0, "weekly").monthly_equivalent(), 433.0);
        // Unknown cycle tags fall back to the raw amount.
        assert_eq!(subscription(50.0, "daily").monthly_equivalent(), 50.0);
    }

    #[test]
    fn test_cycle_label() {
        assert_eq!(subscription(10.0, "biannually").cycle_label(), "Bi-annually");
        assert_eq!(subscription(10.0, "daily").cycle_label(), "daily");
    }
}
