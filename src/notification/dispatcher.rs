use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use super::eligibility::{due_window, is_eligible, Candidate};
use super::email;
use super::mailer::Mailer;
use super::notification_models::{EmailNotification, ItemRef, NotificationType};
use super::notification_repository::NotificationRepository;
use crate::error::{AppError, Result};
use crate::reminder::{Reminder, ReminderRepository};
use crate::subscription::{Subscription, SubscriptionRepository};
use crate::user::UserRepository;

/// Data-query and log-write capability consumed by the dispatcher.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn due_reminders(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<Reminder>>;

    async fn due_subscriptions(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<Subscription>>;

    async fn log_entries(
        &self,
        item: &ItemRef,
        notification_type: NotificationType,
    ) -> Result<Vec<EmailNotification>>;

    /// Reserve the log row for (owner, item, type, window day). `None` means
    /// the row already exists and this notification is someone else's.
    async fn claim(
        &self,
        user_id: Uuid,
        item: &ItemRef,
        notification_type: NotificationType,
        window_date: NaiveDate,
    ) -> Result<Option<Uuid>>;

    async fn mark_sent(&self, claim_id: Uuid) -> Result<()>;

    async fn release(&self, claim_id: Uuid) -> Result<()>;

    async fn advance_billing_date(
        &self,
        subscription_id: Uuid,
        next_billing_date: DateTime<Utc>,
    ) -> Result<()>;
}

pub struct Recipient {
    pub email: String,
    pub notification_enabled: bool,
}

/// Owner-id to email lookup.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn recipient(&self, user_id: Uuid) -> Result<Option<Recipient>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct BatchCounts {
    pub attempted: u32,
    pub sent: u32,
    pub skipped: u32,
}

/// Outcome of one batch run. `attempted = sent + skipped` per item kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct BatchSummary {
    pub reminders: BatchCounts,
    pub subscriptions: BatchCounts,
}

enum Outcome {
    Sent,
    Skipped,
}

/// Orchestrates one notification batch: query due items, check eligibility,
/// render, send, record. All collaborators are injected.
pub struct NotificationDispatcher<S, I, M> {
    store: S,
    identity: I,
    mailer: M,
    app_url: String,
}

impl<S, I, M> NotificationDispatcher<S, I, M>
where
    S: NotificationStore,
    I: IdentityResolver,
    M: Mailer,
{
    pub fn new(store: S, identity: I, mailer: M, app_url: String) -> Self {
        Self {
            store,
            identity,
            mailer,
            app_url,
        }
    }

    /// Run the "due tomorrow" batch for every owner. A failed query aborts
    /// the whole run; a failed send only costs that one item.
    pub async fn run_batch(&self, now: DateTime<Utc>) -> Result<BatchSummary> {
        let (window_start, window_end) = due_window(now);
        info!(
            "checking for payments due between {} and {}",
            window_start, window_end
        );

        let reminders = self.store.due_reminders(window_start, window_end).await?;
        let subscriptions = self
            .store
            .due_subscriptions(window_start, window_end)
            .await?;
        info!(
            "found {} reminders and {} subscriptions due tomorrow",
            reminders.len(),
            subscriptions.len()
        );

        let mut summary = BatchSummary::default();

        for reminder in &reminders {
            summary.reminders.attempted += 1;
            let candidate = Candidate::Reminder(reminder);
            match self.notify(&candidate, window_start, window_end).await {
                Ok(Outcome::Sent) => summary.reminders.sent += 1,
                Ok(Outcome::Skipped) => summary.reminders.skipped += 1,
                Err(e) => {
                    warn!(reminder_id = %reminder.id, "reminder notification failed: {e}");
                    summary.reminders.skipped += 1;
                }
            }
        }

        for subscription in &subscriptions {
            summary.subscriptions.attempted += 1;
            let candidate = Candidate::Subscription(subscription);
            match self.notify(&candidate, window_start, window_end).await {
                Ok(Outcome::Sent) => {
                    summary.subscriptions.sent += 1;
                    self.roll_billing_date(subscription).await;
                }
                Ok(Outcome::Skipped) => summary.subscriptions.skipped += 1,
                Err(e) => {
                    warn!(subscription_id = %subscription.id, "renewal notification failed: {e}");
                    summary.subscriptions.skipped += 1;
                }
            }
        }

        Ok(summary)
    }

    async fn notify(
        &self,
        candidate: &Candidate<'_>,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Outcome> {
        let item = candidate.item_ref();
        let kind = candidate.notification_type();

        let entries = self.store.log_entries(&item, kind).await?;
        if !is_eligible(candidate, window_start, window_end, &entries) {
            debug!(?item, "not eligible, skipping");
            return Ok(Outcome::Skipped);
        }

        let user_id = candidate.user_id();
        let Some(recipient) = self.identity.recipient(user_id).await? else {
            debug!("no email found for user {user_id}, skipping notification");
            return Ok(Outcome::Skipped);
        };
        if !recipient.notification_enabled {
            debug!("user {user_id} has email notifications disabled, skipping");
            return Ok(Outcome::Skipped);
        }

        let Some(claim_id) = self
            .store
            .claim(user_id, &item, kind, window_start.date_naive())
            .await?
        else {
            // A concurrent run already holds this notification.
            return Ok(Outcome::Skipped);
        };

        let rendered = match *candidate {
            Candidate::Reminder(r) => {
                email::reminder_due_tomorrow(r, &recipient.email, &self.app_url)
            }
            Candidate::Subscription(s) => {
                email::subscription_renewal_tomorrow(s, &recipient.email, &self.app_url)
            }
        };

        if let Err(send_err) = self
            .mailer
            .send(&recipient.email, &rendered.subject, &rendered.html)
            .await
        {
            if let Err(release_err) = self.store.release(claim_id).await {
                warn!(?item, "failed to release unsent claim: {release_err}");
            }
            return Err(send_err);
        }

        self.store.mark_sent(claim_id).await?;
        info!(?item, "sent notification email to {}", recipient.email);
        Ok(Outcome::Sent)
    }

    /// After a confirmed renewal notification the next billing date moves
    /// forward one cycle, so tomorrow's batch does not renotify a stale date.
    async fn roll_billing_date(&self, subscription: &Subscription) {
        let cycle = match subscription.billing_cycle.parse::<crate::billing::BillingCycle>() {
            Ok(cycle) => cycle,
            Err(()) => {
                warn!(
                    subscription_id = %subscription.id,
                    "unknown billing cycle {:?}, leaving next billing date unchanged",
                    subscription.billing_cycle
                );
                return;
            }
        };

        let next = cycle.advance(subscription.next_billing_date);
        if let Err(e) = self
            .store
            .advance_billing_date(subscription.id, next)
            .await
        {
            warn!(subscription_id = %subscription.id, "failed to advance billing date: {e}");
        }
    }

    /// User-triggered single send. No windowing and no eligibility check; a
    /// log row is still written so the send shows up in the history.
    pub async fn send_immediate(&self, candidate: &Candidate<'_>) -> Result<()> {
        let user_id = candidate.user_id();
        let recipient = self
            .identity
            .recipient(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No email address on file".to_string()))?;

        let rendered = match *candidate {
            Candidate::Reminder(r) => email::reminder_due_soon(r, &recipient.email, &self.app_url),
            Candidate::Subscription(s) => {
                email::subscription_renewal_soon(s, &recipient.email, &self.app_url)
            }
        };

        self.mailer
            .send(&recipient.email, &rendered.subject, &rendered.html)
            .await?;

        let window_date = candidate.relevant_date().date_naive();
        if let Some(claim_id) = self
            .store
            .claim(user_id, &candidate.item_ref(), NotificationType::Manual, window_date)
            .await?
        {
            self.store.mark_sent(claim_id).await?;
        }

        info!("sent manual notification email to {}", recipient.email);
        Ok(())
    }
}

/// Production store: delegates to the sqlx repositories.
#[derive(Clone)]
pub struct PgNotificationStore {
    reminders: ReminderRepository,
    subscriptions: SubscriptionRepository,
    log: NotificationRepository,
}

impl PgNotificationStore {
    pub fn new(
        reminders: ReminderRepository,
        subscriptions: SubscriptionRepository,
        log: NotificationRepository,
    ) -> Self {
        Self {
            reminders,
            subscriptions,
            log,
        }
    }
}

#[async_trait]
impl NotificationStore for PgNotificationStore {
    async fn due_reminders(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<Reminder>> {
        self.reminders.find_due_between(window_start, window_end).await
    }

    async fn due_subscriptions(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<Subscription>> {
        self.subscriptions
            .find_due_between(window_start, window_end)
            .await
    }

    async fn log_entries(
        &self,
        item: &ItemRef,
        notification_type: NotificationType,
    ) -> Result<Vec<EmailNotification>> {
        self.log.find_for_item(item, notification_type).await
    }

    async fn claim(
        &self,
        user_id: Uuid,
        item: &ItemRef,
        notification_type: NotificationType,
        window_date: NaiveDate,
    ) -> Result<Option<Uuid>> {
        self.log
            .claim(user_id, item, notification_type, window_date)
            .await
    }

    async fn mark_sent(&self, claim_id: Uuid) -> Result<()> {
        self.log.mark_sent(claim_id).await
    }

    async fn release(&self, claim_id: Uuid) -> Result<()> {
        self.log.release(claim_id).await
    }

    async fn advance_billing_date(
        &self,
        subscription_id: Uuid,
        next_billing_date: DateTime<Utc>,
    ) -> Result<()> {
        self.subscriptions
            .advance_billing_date(subscription_id, next_billing_date)
            .await
    }
}

#[async_trait]
impl IdentityResolver for UserRepository {
    async fn recipient(&self, user_id: Uuid) -> Result<Option<Recipient>> {
        let user = self.find_by_id(user_id).await?;

        Ok(user.map(|u| Recipient {
            email: u.email,
            notification_enabled: u.notification_enabled,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MemStore {
        reminders: Vec<Reminder>,
        subscriptions: Vec<Subscription>,
        log: Mutex<Vec<EmailNotification>>,
        advanced: Mutex<Vec<(Uuid, DateTime<Utc>)>>,
        fail_queries: bool,
    }

    impl MemStore {
        fn new(reminders: Vec<Reminder>, subscriptions: Vec<Subscription>) -> Self {
            Self {
                reminders,
                subscriptions,
                log: Mutex::new(Vec::new()),
                advanced: Mutex::new(Vec::new()),
                fail_queries: false,
            }
        }

        fn log_rows(&self) -> Vec<EmailNotification> {
            self.log.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationStore for &MemStore {
        async fn due_reminders(
            &self,
            window_start: DateTime<Utc>,
            window_end: DateTime<Utc>,
        ) -> Result<Vec<Reminder>> {
            if self.fail_queries {
                return Err(AppError::Database(sqlx::Error::PoolTimedOut));
            }
            Ok(self
                .reminders
                .iter()
                .filter(|r| !r.paid && r.due_date >= window_start && r.due_date <= window_end)
                .cloned()
                .collect())
        }

        async fn due_subscriptions(
            &self,
            window_start: DateTime<Utc>,
            window_end: DateTime<Utc>,
        ) -> Result<Vec<Subscription>> {
            if self.fail_queries {
                return Err(AppError::Database(sqlx::Error::PoolTimedOut));
            }
            Ok(self
                .subscriptions
                .iter()
                .filter(|s| {
                    s.active
                        && s.next_billing_date >= window_start
                        && s.next_billing_date <= window_end
                })
                .cloned()
                .collect())
        }

        async fn log_entries(
            &self,
            item: &ItemRef,
            notification_type: NotificationType,
        ) -> Result<Vec<EmailNotification>> {
            Ok(self
                .log
                .lock()
                .unwrap()
                .iter()
                .filter(|e| {
                    e.references(item) && e.notification_type == notification_type.as_str()
                })
                .cloned()
                .collect())
        }

        async fn claim(
            &self,
            user_id: Uuid,
            item: &ItemRef,
            notification_type: NotificationType,
            window_date: NaiveDate,
        ) -> Result<Option<Uuid>> {
            let mut log = self.log.lock().unwrap();
            let duplicate = log.iter().any(|e| {
                e.references(item)
                    && e.notification_type == notification_type.as_str()
                    && e.window_date == window_date
            });
            if duplicate {
                return Ok(None);
            }

            let id = Uuid::new_v4();
            log.push(EmailNotification {
                id,
                user_id,
                reminder_id: item.reminder_id(),
                subscription_id: item.subscription_id(),
                notification_type: notification_type.as_str().to_string(),
                window_date,
                status: "pending".to_string(),
                sent_at: None,
                created_at: Utc::now(),
            });
            Ok(Some(id))
        }

        async fn mark_sent(&self, claim_id: Uuid) -> Result<()> {
            let mut log = self.log.lock().unwrap();
            if let Some(entry) = log.iter_mut().find(|e| e.id == claim_id) {
                entry.status = "sent".to_string();
                entry.sent_at = Some(Utc::now());
            }
            Ok(())
        }

        async fn release(&self, claim_id: Uuid) -> Result<()> {
            self.log.lock().unwrap().retain(|e| e.id != claim_id);
            Ok(())
        }

        async fn advance_billing_date(
            &self,
            subscription_id: Uuid,
            next_billing_date: DateTime<Utc>,
        ) -> Result<()> {
            self.advanced
                .lock()
                .unwrap()
                .push((subscription_id, next_billing_date));
            Ok(())
        }
    }

    struct MemIdentity {
        recipients: HashMap<Uuid, (String, bool)>,
    }

    #[async_trait]
    impl IdentityResolver for &MemIdentity {
        async fn recipient(&self, user_id: Uuid) -> Result<Option<Recipient>> {
            Ok(self.recipients.get(&user_id).map(|(email, enabled)| Recipient {
                email: email.clone(),
                notification_enabled: *enabled,
            }))
        }
    }

    struct MemMailer {
        sent: Mutex<Vec<(String, String)>>,
        fail_for: Option<String>,
    }

    impl MemMailer {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_for: None,
            }
        }

        fn failing_for(address: &str) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_for: Some(address.to_string()),
            }
        }

        fn sent_to(&self) -> Vec<String> {
            self.sent.lock().unwrap().iter().map(|(to, _)| to.clone()).collect()
        }
    }

    #[async_trait]
    impl Mailer for &MemMailer {
        async fn send(&self, to: &str, subject: &str, _html_body: &str) -> Result<()> {
            if self.fail_for.as_deref() == Some(to) {
                return Err(AppError::Mailer("mailbox unavailable".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string()));
            Ok(())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    fn reminder(user_id: Uuid, due: DateTime<Utc>, paid: bool) -> Reminder {
        Reminder {
            id: Uuid::new_v4(),
            user_id,
            title: "Rent".to_string(),
            amount: 15000.0,
            due_date: due,
            category: "rent".to_string(),
            priority: "high".to_string(),
            recurring: true,
            paid,
            created_at: due - Duration::days(30),
        }
    }

    fn subscription(user_id: Uuid, next_billing: DateTime<Utc>) -> Subscription {
        Subscription {
            id: Uuid::new_v4(),
            user_id,
            name: "Streaming".to_string(),
            amount: 499.0,
            billing_cycle: "monthly".to_string(),
            category: "entertainment".to_string(),
            start_date: next_billing - Duration::days(90),
            next_billing_date: next_billing,
            website: None,
            active: true,
            created_at: next_billing - Duration::days(90),
        }
    }

    fn identity_for(users: &[(Uuid, &str)]) -> MemIdentity {
        MemIdentity {
            recipients: users
                .iter()
                .map(|(id, email)| (*id, (email.to_string(), true)))
                .collect(),
        }
    }

    fn dispatcher<'a>(
        store: &'a MemStore,
        identity: &'a MemIdentity,
        mailer: &'a MemMailer,
    ) -> NotificationDispatcher<&'a MemStore, &'a MemIdentity, &'a MemMailer> {
        NotificationDispatcher::new(store, identity, mailer, "https://fintrack.app".to_string())
    }

    #[tokio::test]
    async fn test_batch_notifies_only_due_and_unpaid_items() {
        let user = Uuid::new_v4();
        let tomorrow = now() + Duration::days(1);

        let unpaid = reminder(user, tomorrow, false);
        let paid = reminder(user, tomorrow, true);
        let in_three_days = subscription(user, now() + Duration::days(3));

        let store = MemStore::new(vec![unpaid.clone(), paid], vec![in_three_days]);
        let identity = identity_for(&[(user, "asha@example.com")]);
        let mailer = MemMailer::new();

        let summary = dispatcher(&store, &identity, &mailer)
            .run_batch(now())
            .await
            .unwrap();

        assert_eq!(summary.reminders, BatchCounts { attempted: 1, sent: 1, skipped: 0 });
        assert_eq!(summary.subscriptions, BatchCounts::default());

        let log = store.log_rows();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].reminder_id, Some(unpaid.id));
        assert_eq!(log[0].notification_type, "reminder_due_tomorrow");
        assert_eq!(log[0].status, "sent");
        assert_eq!(mailer.sent_to(), vec!["asha@example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_batch_is_idempotent_within_a_window() {
        let user = Uuid::new_v4();
        let store = MemStore::new(vec![reminder(user, now() + Duration::days(1), false)], vec![]);
        let identity = identity_for(&[(user, "asha@example.com")]);
        let mailer = MemMailer::new();
        let dispatcher = dispatcher(&store, &identity, &mailer);

        let first = dispatcher.run_batch(now()).await.unwrap();
        assert_eq!(first.reminders.sent, 1);

        // A second trigger in the same window must not resend.
        let second = dispatcher.run_batch(now() + Duration::hours(2)).await.unwrap();
        assert_eq!(second.reminders, BatchCounts { attempted: 1, sent: 0, skipped: 1 });
        assert_eq!(store.log_rows().len(), 1);
        assert_eq!(mailer.sent_to().len(), 1);
    }

    #[tokio::test]
    async fn test_send_failure_is_isolated_to_one_item() {
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
        let tomorrow = now() + Duration::days(1);

        let store = MemStore::new(
            vec![reminder(alice, tomorrow, false), reminder(bob, tomorrow, false)],
            vec![],
        );
        let identity = identity_for(&[(alice, "alice@example.com"), (bob, "bob@example.com")]);
        let mailer = MemMailer::failing_for("alice@example.com");

        let summary = dispatcher(&store, &identity, &mailer)
            .run_batch(now())
            .await
            .unwrap();

        assert_eq!(summary.reminders, BatchCounts { attempted: 2, sent: 1, skipped: 1 });

        // The failed claim is released; only the delivered row remains.
        let log = store.log_rows();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].status, "sent");
        assert_eq!(mailer.sent_to(), vec!["bob@example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_unresolvable_owner_is_skipped() {
        let user = Uuid::new_v4();
        let store = MemStore::new(vec![reminder(user, now() + Duration::days(1), false)], vec![]);
        let identity = identity_for(&[]);
        let mailer = MemMailer::new();

        let summary = dispatcher(&store, &identity, &mailer)
            .run_batch(now())
            .await
            .unwrap();

        assert_eq!(summary.reminders, BatchCounts { attempted: 1, sent: 0, skipped: 1 });
        assert!(store.log_rows().is_empty());
        assert!(mailer.sent_to().is_empty());
    }

    #[tokio::test]
    async fn test_opted_out_owner_is_skipped() {
        let user = Uuid::new_v4();
        let store = MemStore::new(vec![reminder(user, now() + Duration::days(1), false)], vec![]);
        let identity = MemIdentity {
            recipients: [(user, ("asha@example.com".to_string(), false))].into(),
        };
        let mailer = MemMailer::new();

        let summary = dispatcher(&store, &identity, &mailer)
            .run_batch(now())
            .await
            .unwrap();

        assert_eq!(summary.reminders, BatchCounts { attempted: 1, sent: 0, skipped: 1 });
        assert!(mailer.sent_to().is_empty());
    }

    #[tokio::test]
    async fn test_window_end_is_inclusive_and_a_millisecond_past_is_not() {
        let user = Uuid::new_v4();
        let (_, window_end) = due_window(now());

        let at_end = subscription(user, window_end);
        let past_end = subscription(user, window_end + Duration::milliseconds(1));

        let store = MemStore::new(vec![], vec![at_end.clone(), past_end]);
        let identity = identity_for(&[(user, "asha@example.com")]);
        let mailer = MemMailer::new();

        let summary = dispatcher(&store, &identity, &mailer)
            .run_batch(now())
            .await
            .unwrap();

        assert_eq!(summary.subscriptions, BatchCounts { attempted: 1, sent: 1, skipped: 0 });
        let log = store.log_rows();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].subscription_id, Some(at_end.id));
    }

    #[tokio::test]
    async fn test_confirmed_renewal_advances_billing_date_one_cycle() {
        let user = Uuid::new_v4();
        let next_billing = now() + Duration::days(1);
        let sub = subscription(user, next_billing);

        let store = MemStore::new(vec![], vec![sub.clone()]);
        let identity = identity_for(&[(user, "asha@example.com")]);
        let mailer = MemMailer::new();

        dispatcher(&store, &identity, &mailer)
            .run_batch(now())
            .await
            .unwrap();

        let advanced = store.advanced.lock().unwrap().clone();
        assert_eq!(
            advanced,
            vec![(sub.id, crate::billing::BillingCycle::Monthly.advance(next_billing))]
        );
    }

    #[tokio::test]
    async fn test_query_failure_aborts_the_batch() {
        let mut store = MemStore::new(vec![], vec![]);
        store.fail_queries = true;
        let identity = identity_for(&[]);
        let mailer = MemMailer::new();

        let result = dispatcher(&store, &identity, &mailer).run_batch(now()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_send_immediate_skips_eligibility_but_logs() {
        let user = Uuid::new_v4();
        // Already paid, so the batch would never touch it.
        let paid = reminder(user, now() + Duration::days(10), true);

        let store = MemStore::new(vec![], vec![]);
        let identity = identity_for(&[(user, "asha@example.com")]);
        let mailer = MemMailer::new();

        dispatcher(&store, &identity, &mailer)
            .send_immediate(&Candidate::Reminder(&paid))
            .await
            .unwrap();

        assert_eq!(mailer.sent_to(), vec!["asha@example.com".to_string()]);
        let log = store.log_rows();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].notification_type, "manual");
        assert_eq!(log[0].status, "sent");
    }

    #[tokio::test]
    async fn test_send_immediate_propagates_send_errors() {
        let user = Uuid::new_v4();
        let item = reminder(user, now() + Duration::days(2), false);

        let store = MemStore::new(vec![], vec![]);
        let identity = identity_for(&[(user, "asha@example.com")]);
        let mailer = MemMailer::failing_for("asha@example.com");

        let result = dispatcher(&store, &identity, &mailer)
            .send_immediate(&Candidate::Reminder(&item))
            .await;

        assert!(matches!(result, Err(AppError::Mailer(_))));
        assert!(store.log_rows().is_empty());
    }
}
