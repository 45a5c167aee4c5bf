use chrono::{DateTime, Duration, NaiveTime, Utc};
use uuid::Uuid;

use super::notification_models::{EmailNotification, ItemRef, NotificationType};
use crate::reminder::Reminder;
use crate::subscription::Subscription;

/// An item the batch may notify about.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    Reminder(&'a Reminder),
    Subscription(&'a Subscription),
}

impl<'a> Candidate<'a> {
    pub fn user_id(&self) -> Uuid {
        match self {
            Candidate::Reminder(r) => r.user_id,
            Candidate::Subscription(s) => s.user_id,
        }
    }

    pub fn item_ref(&self) -> ItemRef {
        match self {
            Candidate::Reminder(r) => ItemRef::Reminder(r.id),
            Candidate::Subscription(s) => ItemRef::Subscription(s.id),
        }
    }

    /// Due date for reminders, next billing date for subscriptions.
    pub fn relevant_date(&self) -> DateTime<Utc> {
        match self {
            Candidate::Reminder(r) => r.due_date,
            Candidate::Subscription(s) => s.next_billing_date,
        }
    }

    pub fn notification_type(&self) -> NotificationType {
        match self {
            Candidate::Reminder(_) => NotificationType::ReminderDueTomorrow,
            Candidate::Subscription(_) => NotificationType::SubscriptionDueTomorrow,
        }
    }

    fn is_actionable(&self) -> bool {
        match self {
            Candidate::Reminder(r) => !r.paid,
            Candidate::Subscription(s) => s.active,
        }
    }
}

/// The batch due window: the whole of the calendar day after `now`.
pub fn due_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let tomorrow = (now + Duration::days(1)).date_naive();
    let start = tomorrow.and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1) - Duration::milliseconds(1);
    (start, end)
}

/// Whether a notification should fire for `candidate` in the given window.
///
/// Eligible iff the relevant date falls inside [window_start, window_end]
/// (inclusive at both ends), the item is still actionable (unpaid / active),
/// and no log entry for the same item and type already covers this window.
/// The last clause is what makes repeated runs within one window idempotent.
pub fn is_eligible(
    candidate: &Candidate<'_>,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    existing: &[EmailNotification],
) -> bool {
    let due = candidate.relevant_date();
    if due < window_start || due > window_end {
        return false;
    }
    if !candidate.is_actionable() {
        return false;
    }

    let item = candidate.item_ref();
    let kind = candidate.notification_type();
    let window_days = window_start.date_naive()..=window_end.date_naive();

    !existing.iter().any(|entry| {
        entry.references(&item)
            && entry.notification_type == kind.as_str()
            && window_days.contains(&entry.window_date)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn reminder(due: DateTime<Utc>, paid: bool) -> Reminder {
        Reminder {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Electricity bill".to_string(),
            amount: 1450.0,
            due_date: due,
            category: "utility".to_string(),
            priority: "high".to_string(),
            recurring: true,
            paid,
            created_at: due - Duration::days(30),
        }
    }

    fn subscription(next_billing: DateTime<Utc>, active: bool) -> Subscription {
        Subscription {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Streaming".to_string(),
            amount: 499.0,
            billing_cycle: "monthly".to_string(),
            category: "entertainment".to_string(),
            start_date: next_billing - Duration::days(90),
            next_billing_date: next_billing,
            website: None,
            active,
            created_at: next_billing - Duration::days(90),
        }
    }

    fn log_entry(item: &ItemRef, kind: NotificationType, window_date: chrono::NaiveDate) -> EmailNotification {
        EmailNotification {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            reminder_id: item.reminder_id(),
            subscription_id: item.subscription_id(),
            notification_type: kind.as_str().to_string(),
            window_date,
            status: "sent".to_string(),
            sent_at: Some(Utc::now()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_due_window_covers_tomorrow() {
        let now = at(2025, 3, 10, 14, 30, 0);
        let (start, end) = due_window(now);

        assert_eq!(start, at(2025, 3, 11, 0, 0, 0));
        assert_eq!(end, at(2025, 3, 11, 23, 59, 59) + Duration::milliseconds(999));
    }

    #[test]
    fn test_window_boundaries_are_inclusive() {
        let (start, end) = due_window(at(2025, 3, 10, 9, 0, 0));

        let at_start = reminder(start, false);
        let at_end = reminder(end, false);
        assert!(is_eligible(&Candidate::Reminder(&at_start), start, end, &[]));
        assert!(is_eligible(&Candidate::Reminder(&at_end), start, end, &[]));
    }

    #[test]
    fn test_just_outside_window_is_excluded() {
        let (start, end) = due_window(at(2025, 3, 10, 9, 0, 0));

        let before = reminder(start - Duration::milliseconds(1), false);
        let after = reminder(end + Duration::milliseconds(1), false);
        assert!(!is_eligible(&Candidate::Reminder(&before), start, end, &[]));
        assert!(!is_eligible(&Candidate::Reminder(&after), start, end, &[]));
    }

    #[test]
    fn test_paid_reminder_is_never_eligible() {
        let (start, end) = due_window(at(2025, 3, 10, 9, 0, 0));

        let paid = reminder(start + Duration::hours(12), true);
        assert!(!is_eligible(&Candidate::Reminder(&paid), start, end, &[]));
    }

    #[test]
    fn test_cancelled_subscription_is_never_eligible() {
        let (start, end) = due_window(at(2025, 3, 10, 9, 0, 0));

        let cancelled = subscription(start + Duration::hours(12), false);
        assert!(!is_eligible(&Candidate::Subscription(&cancelled), start, end, &[]));
    }

    #[test]
    fn test_existing_log_entry_blocks_resend() {
        let (start, end) = due_window(at(2025, 3, 10, 9, 0, 0));
        let due = reminder(start + Duration::hours(12), false);
        let candidate = Candidate::Reminder(&due);

        assert!(is_eligible(&candidate, start, end, &[]));

        let entry = log_entry(
            &candidate.item_ref(),
            NotificationType::ReminderDueTomorrow,
            start.date_naive(),
        );
        assert!(!is_eligible(&candidate, start, end, &[entry]));
    }

    #[test]
    fn test_log_entry_for_other_window_does_not_block() {
        let (start, end) = due_window(at(2025, 3, 10, 9, 0, 0));
        let due = reminder(start + Duration::hours(12), false);
        let candidate = Candidate::Reminder(&due);

        // A notification sent for an earlier occurrence (the reminder has
        // since been snoozed into this window) must not suppress this one.
        let stale = log_entry(
            &candidate.item_ref(),
            NotificationType::ReminderDueTomorrow,
            start.date_naive() - Duration::days(1),
        );
        assert!(is_eligible(&candidate, start, end, &[stale]));
    }

    #[test]
    fn test_log_entry_of_other_type_does_not_block() {
        let (start, end) = due_window(at(2025, 3, 10, 9, 0, 0));
        let due = reminder(start + Duration::hours(12), false);
        let candidate = Candidate::Reminder(&due);

        let manual = log_entry(
            &candidate.item_ref(),
            NotificationType::Manual,
            start.date_naive(),
        );
        assert!(is_eligible(&candidate, start, end, &[manual]));
    }

    #[test]
    fn test_log_entry_for_other_item_does_not_block() {
        let (start, end) = due_window(at(2025, 3, 10, 9, 0, 0));
        let due = reminder(start + Duration::hours(12), false);
        let candidate = Candidate::Reminder(&due);

        let other = log_entry(
            &ItemRef::Reminder(Uuid::new_v4()),
            NotificationType::ReminderDueTomorrow,
            start.date_naive(),
        );
        assert!(is_eligible(&candidate, start, end, &[other]));
    }
}
