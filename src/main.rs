mod auth;
mod billing;
mod db;
mod document;
mod error;
mod expense;
mod middleware;
mod notification;
mod reminder;
mod routes;
mod state;
mod subscription;
mod user;

use std::sync::Arc;
use std::time::Duration;

use db::{create_pool, run_migrations};
use document::DocumentRepository;
use expense::ExpenseRepository;
use notification::{
    start_notification_scheduler, NotificationDispatcher, NotificationRepository,
    PgNotificationStore, ResendMailer,
};
use reminder::{ReminderRepository, ReminderService};
use routes::create_router;
use state::{AppState, Config};
use subscription::{SubscriptionRepository, SubscriptionService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user::UserRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fintrack=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    run_migrations(&db).await?;

    // Create repositories
    let user_repository = UserRepository::new(db.clone());
    let reminder_repository = ReminderRepository::new(db.clone());
    let subscription_repository = SubscriptionRepository::new(db.clone());
    let expense_repository = ExpenseRepository::new(db.clone());
    let document_repository = DocumentRepository::new(db.clone());
    let notification_repository = NotificationRepository::new(db.clone());

    // Create services
    let reminder_service = ReminderService::new(reminder_repository.clone());
    let subscription_service = SubscriptionService::new(subscription_repository.clone());

    // Wire the notification dispatcher. Without provider credentials the
    // notification endpoints report a configuration error instead.
    let dispatcher = match config.resend_api_key.clone() {
        Some(api_key) => {
            let mailer = ResendMailer::new(
                api_key,
                config.from_email.clone(),
                Duration::from_secs(config.mailer_timeout_secs),
            )?;
            let store = PgNotificationStore::new(
                reminder_repository.clone(),
                subscription_repository.clone(),
                notification_repository.clone(),
            );
            Some(Arc::new(NotificationDispatcher::new(
                store,
                user_repository.clone(),
                mailer,
                config.app_url.clone(),
            )))
        }
        None => {
            tracing::warn!("RESEND_API_KEY is not set; email notifications are disabled");
            None
        }
    };

    // Create application state
    let state = AppState {
        db: db.clone(),
        config: config.clone(),
        user_repository,
        reminder_repository,
        subscription_repository,
        expense_repository,
        document_repository,
        notification_repository,
        reminder_service,
        subscription_service,
        dispatcher,
    };

    // Start the notification scheduler
    let scheduler_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = start_notification_scheduler(scheduler_state).await {
            tracing::error!("Notification scheduler error: {:?}", e);
        }
    });

    // Create router
    let app = create_router(state);

    // Start server
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
