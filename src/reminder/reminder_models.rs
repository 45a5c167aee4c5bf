use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderCategory {
    CreditCard,
    Subscription,
    Emi,
    Rent,
    Utility,
    Other,
}

impl ReminderCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderCategory::CreditCard => "credit-card",
            ReminderCategory::Subscription => "subscription",
            ReminderCategory::Emi => "emi",
            ReminderCategory::Rent => "rent",
            ReminderCategory::Utility => "utility",
            ReminderCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for ReminderCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReminderCategory::CreditCard => write!(f, "Credit Card"),
            ReminderCategory::Subscription => write!(f, "Subscription"),
            ReminderCategory::Emi => write!(f, "EMI"),
            ReminderCategory::Rent => write!(f, "Rent"),
            ReminderCategory::Utility => write!(f, "Utility"),
            ReminderCategory::Other => write!(f, "Other"),
        }
    }
}

impl std::str::FromStr for ReminderCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit-card" => Ok(ReminderCategory::CreditCard),
            "subscription" => Ok(ReminderCategory::Subscription),
            "emi" => Ok(ReminderCategory::Emi),
            "rent" => Ok(ReminderCategory::Rent),
            "utility" => Ok(ReminderCategory::Utility),
            "other" => Ok(ReminderCategory::Other),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReminderPriority {
    High,
    Medium,
    Low,
}

impl ReminderPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderPriority::High => "high",
            ReminderPriority::Medium => "medium",
            ReminderPriority::Low => "low",
        }
    }
}

impl std::fmt::Display for ReminderPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReminderPriority::High => write!(f, "High"),
            ReminderPriority::Medium => write!(f, "Medium"),
            ReminderPriority::Low => write!(f, "Low"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reminder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub amount: f64,
    pub due_date: DateTime<Utc>,
    pub category: String,
    pub priority: String,
    pub recurring: bool,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    /// Display label for the stored category tag.
    pub fn category_label(&self) -> String {
        match self.category.parse::<ReminderCategory>() {
            Ok(c) => c.to_string(),
            Err(()) => self.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display() {
        assert_eq!(ReminderCategory::CreditCard.to_string(), "Credit Card");
        assert_eq!(ReminderCategory::Emi.to_string(), "EMI");
        assert_eq!(ReminderCategory::Other.to_string(), "Other");
    }

    #[test]
    fn test_category_tag_round_trip() {
        for category in [
            ReminderCategory::CreditCard,
            ReminderCategory::Subscription,
            ReminderCategory::Emi,
            ReminderCategory::Rent,
            ReminderCategory::Utility,
            ReminderCategory::Other,
        ] {
            assert_eq!(category.as_str().parse::<ReminderCategory>(), Ok(category));
        }
    }

    #[test]
    fn test_priority_display() {
        assert_eq!(ReminderPriority::High.to_string(), "High");
        assert_eq!(ReminderPriority::Medium.to_string(), "Medium");
        assert_eq!(ReminderPriority::Low.to_string(), "Low");
    }
}
