use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Average weeks in a month (365.25 / 12 / 7), used to put weekly charges on
/// a monthly basis.
const WEEKS_PER_MONTH: f64 = 4.33;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Weekly,
    Monthly,
    Quarterly,
    Biannually,
    Yearly,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Weekly => "weekly",
            BillingCycle::Monthly => "monthly",
            BillingCycle::Quarterly => "quarterly",
            BillingCycle::Biannually => "biannually",
            BillingCycle::Yearly => "yearly",
        }
    }

    /// The next billing date one cycle after `from`.
    pub fn advance(&self, from: DateTime<Utc>) -> DateTime<Utc> {
        let months = match self {
            BillingCycle::Weekly => return from + Duration::days(7),
            BillingCycle::Monthly => 1,
            BillingCycle::Quarterly => 3,
            BillingCycle::Biannually => 6,
            BillingCycle::Yearly => 12,
        };
        from.checked_add_months(Months::new(months)).unwrap_or(from)
    }
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillingCycle::Weekly => write!(f, "Weekly"),
            BillingCycle::Monthly => write!(f, "Monthly"),
            BillingCycle::Quarterly => write!(f, "Quarterly"),
            BillingCycle::Biannually => write!(f, "Bi-annually"),
            BillingCycle::Yearly => write!(f, "Yearly"),
        }
    }
}

impl std::str::FromStr for BillingCycle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(BillingCycle::Weekly),
            "monthly" => Ok(BillingCycle::Monthly),
            "quarterly" => Ok(BillingCycle::Quarterly),
            "biannually" => Ok(BillingCycle::Biannually),
            "yearly" => Ok(BillingCycle::Yearly),
            _ => Err(()),
        }
    }
}

/// Normalized monthly cost of an amount charged on the given cycle.
pub fn monthly_equivalent(amount: f64, cycle: BillingCycle) -> f64 {
    match cycle {
        BillingCycle::Weekly => amount * WEEKS_PER_MONTH,
        BillingCycle::Monthly => amount,
        BillingCycle::Quarterly => amount / 3.0,
        BillingCycle::Biannually => amount / 6.0,
        BillingCycle::Yearly => amount / 12.0,
    }
}

/// String entry point for rows holding a raw cycle tag. An unknown tag is not
/// an error; the amount comes back unchanged.
pub fn monthly_equivalent_of(amount: f64, cycle: &str) -> f64 {
    match cycle.parse::<BillingCycle>() {
        Ok(c) => monthly_equivalent(amount, c),
        Err(()) => amount,
    }
}

/// Display label for a raw cycle tag; unknown tags pass through verbatim.
pub fn cycle_label(cycle: &str) -> String {
    match cycle.parse::<BillingCycle>() {
        Ok(c) => c.to_string(),
        Err(()) => cycle.to_string(),
    }
}

/// Whole days until `due`, as a calendar-day ceiling. Negative when overdue.
pub fn days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (due - now).num_milliseconds();
    (millis as f64 / 86_400_000.0).ceil() as i64
}

/// Human label for the time remaining until `due`.
pub fn time_remaining_label(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = days_until(due, now);

    if days < 0 {
        return "Overdue".to_string();
    }
    match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        2..=6 => format!("In {} days", days),
        7..=13 => "Next week".to_string(),
        _ => format!("In {} days", days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_monthly_equivalent_known_cycles() {
        assert_eq!(monthly_equivalent(100.0, BillingCycle::Weekly), 433.0);
        assert_eq!(monthly_equivalent(100.0, BillingCycle::Monthly), 100.0);
        assert_eq!(monthly_equivalent(300.0, BillingCycle::Quarterly), 100.0);
        assert_eq!(monthly_equivalent(600.0, BillingCycle::Biannually), 100.0);
        assert_eq!(monthly_equivalent(1200.0, BillingCycle::Yearly), 100.0);
    }

    #[test]
    fn test_monthly_equivalent_round_trips() {
        let cases = [
            (BillingCycle::Weekly, WEEKS_PER_MONTH),
            (BillingCycle::Monthly, 1.0),
            (BillingCycle::Quarterly, 1.0 / 3.0),
            (BillingCycle::Biannually, 1.0 / 6.0),
            (BillingCycle::Yearly, 1.0 / 12.0),
        ];
        for (cycle, factor) in cases {
            let original = 199.99;
            let back = monthly_equivalent(original, cycle) / factor;
            assert!(
                (back - original).abs() < 1e-9,
                "{cycle:?} did not round-trip: {back}"
            );
        }
    }

    #[test]
    fn test_monthly_equivalent_of_unknown_tag() {
        assert_eq!(monthly_equivalent_of(100.0, "fortnightly"), 100.0);
        assert_eq!(monthly_equivalent_of(100.0, "weekly"), 433.0);
    }

    #[test]
    fn test_cycle_label() {
        assert_eq!(cycle_label("weekly"), "Weekly");
        assert_eq!(cycle_label("monthly"), "Monthly");
        assert_eq!(cycle_label("quarterly"), "Quarterly");
        assert_eq!(cycle_label("biannually"), "Bi-annually");
        assert_eq!(cycle_label("yearly"), "Yearly");
        assert_eq!(cycle_label("fortnightly"), "fortnightly");
    }

    #[test]
    fn test_days_until_exact_days() {
        let now = at(2025, 3, 10, 12, 0, 0);
        assert_eq!(days_until(now + Duration::days(1), now), 1);
        assert_eq!(days_until(now - Duration::days(1), now), -1);
        assert_eq!(days_until(now, now), 0);
    }

    #[test]
    fn test_days_until_rounds_up_partial_days() {
        let now = at(2025, 3, 10, 12, 0, 0);
        // Midnight tonight is half a day away, which still counts as 1.
        let midnight = at(2025, 3, 11, 0, 0, 0);
        assert_eq!(days_until(midnight, now), 1);
        // One millisecond after now is still "today".
        assert_eq!(days_until(now + Duration::milliseconds(1), now), 1);
    }

    #[test]
    fn test_time_remaining_labels() {
        let now = at(2025, 3, 10, 9, 0, 0);
        assert_eq!(time_remaining_label(now - Duration::days(2), now), "Overdue");
        assert_eq!(time_remaining_label(now, now), "Today");
        assert_eq!(time_remaining_label(now + Duration::days(1), now), "Tomorrow");
        assert_eq!(time_remaining_label(now + Duration::days(3), now), "In 3 days");
        assert_eq!(time_remaining_label(now + Duration::days(7), now), "Next week");
        assert_eq!(time_remaining_label(now + Duration::days(13), now), "Next week");
        assert_eq!(time_remaining_label(now + Duration::days(14), now), "In 14 days");
        assert_eq!(time_remaining_label(now + Duration::days(30), now), "In 30 days");
    }

    #[test]
    fn test_billing_cycle_display() {
        assert_eq!(BillingCycle::Weekly.to_string(), "Weekly");
        assert_eq!(BillingCycle::Biannually.to_string(), "Bi-annually");
        assert_eq!(BillingCycle::Yearly.to_string(), "Yearly");
    }

    #[test]
    fn test_billing_cycle_advance() {
        let from = at(2025, 1, 31, 10, 0, 0);
        assert_eq!(
            BillingCycle::Weekly.advance(from),
            at(2025, 2, 7, 10, 0, 0)
        );
        // Clamped to the end of February.
        assert_eq!(
            BillingCycle::Monthly.advance(from),
            at(2025, 2, 28, 10, 0, 0)
        );
        assert_eq!(
            BillingCycle::Quarterly.advance(from),
            at(2025, 4, 30, 10, 0, 0)
        );
        assert_eq!(
            BillingCycle::Yearly.advance(from),
            at(2026, 1, 31, 10, 0, 0)
        );
    }
}
