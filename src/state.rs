use std::sync::Arc;

use crate::db::DbPool;
use crate::document::DocumentRepository;
use crate::expense::ExpenseRepository;
use crate::notification::{
    NotificationDispatcher, NotificationRepository, PgNotificationStore, ResendMailer,
};
use crate::reminder::{ReminderRepository, ReminderService};
use crate::subscription::{SubscriptionRepository, SubscriptionService};
use crate::user::UserRepository;

/// The production dispatcher wiring: Postgres-backed store and identity
/// lookup, Resend for delivery.
pub type AppDispatcher =
    NotificationDispatcher<PgNotificationStore, UserRepository, ResendMailer>;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub user_repository: UserRepository,
    pub reminder_repository: ReminderRepository,
    pub subscription_repository: SubscriptionRepository,
    pub expense_repository: ExpenseRepository,
    pub document_repository: DocumentRepository,
    pub notification_repository: NotificationRepository,
    pub reminder_service: ReminderService,
    pub subscription_service: SubscriptionService,
    /// `None` when the email provider is not configured; notification
    /// endpoints then fail with a configuration error.
    pub dispatcher: Option<Arc<AppDispatcher>>,
}

#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub resend_api_key: Option<String>,
    pub from_email: String,
    pub app_url: String,
    pub notification_cron: String,
    pub cron_secret: Option<String>,
    pub mailer_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .expect("JWT_EXPIRATION_HOURS must be a number"),
            resend_api_key: std::env::var("RESEND_API_KEY").ok(),
            from_email: std::env::var("FROM_EMAIL")
                .unwrap_or_else(|_| "FinTrack <notifications@fintrack.app>".to_string()),
            app_url: std::env::var("APP_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            notification_cron: std::env::var("NOTIFICATION_CRON")
                .unwrap_or_else(|_| "0 0 6 * * *".to_string()),
            cron_secret: std::env::var("CRON_SECRET").ok(),
            mailer_timeout_secs: std::env::var("MAILER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("MAILER_TIMEOUT_SECS must be a number"),
        }
    }
}
