use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::auth_dto::{AuthResponse, LoginRequest, RegisterRequest},
    auth::auth_handlers,
    billing::BillingCycle,
    document::document_dto::CreateDocumentRequest,
    document::document_handlers,
    document::FinancialDocument,
    expense::expense_dto::CreateExpenseRequest,
    expense::expense_handlers,
    expense::{CategoryTotal, Expense},
    middleware::auth_middleware,
    notification::dispatcher::{BatchCounts, BatchSummary},
    notification::notification_dto::{
        RunBatchResponse, SendKind, SendNotificationRequest, SendNotificationResponse,
    },
    notification::notification_handlers,
    notification::{EmailNotification, NotificationType},
    reminder::reminder_dto::{CreateReminderRequest, UpcomingReminder},
    reminder::reminder_handlers,
    reminder::{Reminder, ReminderCategory, ReminderPriority},
    state::AppState,
    subscription::subscription_dto::{CreateSubscriptionRequest, SubscriptionSummary},
    subscription::subscription_handlers,
    subscription::Subscription,
    user::user_dto::UpdateNotificationPreferencesRequest,
    user::user_handlers,
    user::UserResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth_handlers::register,
        auth_handlers::login,
        user_handlers::get_me,
        user_handlers::update_notification_preferences,
        reminder_handlers::get_reminders,
        reminder_handlers::create_reminder,
        reminder_handlers::mark_reminder_paid,
        reminder_handlers::snooze_reminder,
        reminder_handlers::delete_reminder,
        reminder_handlers::get_upcoming_reminders,
        subscription_handlers::get_subscriptions,
        subscription_handlers::create_subscription,
        subscription_handlers::cancel_subscription,
        subscription_handlers::delete_subscription,
        subscription_handlers::get_subscription_summary,
        expense_handlers::get_expenses,
        expense_handlers::create_expense,
        expense_handlers::delete_expense,
        expense_handlers::get_expense_summary,
        document_handlers::get_documents,
        document_handlers::create_document,
        document_handlers::delete_document,
        notification_handlers::get_notifications,
        notification_handlers::send_notification,
        notification_handlers::run_notifications,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserResponse,
            UpdateNotificationPreferencesRequest,
            Reminder,
            ReminderCategory,
            ReminderPriority,
            CreateReminderRequest,
            UpcomingReminder,
            Subscription,
            BillingCycle,
            CreateSubscriptionRequest,
            SubscriptionSummary,
            Expense,
            CategoryTotal,
            CreateExpenseRequest,
            FinancialDocument,
            CreateDocumentRequest,
            EmailNotification,
            NotificationType,
            SendKind,
            SendNotificationRequest,
            SendNotificationResponse,
            RunBatchResponse,
            BatchCounts,
            BatchSummary,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User profile and preferences"),
        (name = "reminders", description = "Payment reminder endpoints"),
        (name = "subscriptions", description = "Subscription endpoints"),
        (name = "expenses", description = "Expense logging endpoints"),
        (name = "documents", description = "Financial document metadata"),
        (name = "notifications", description = "Email notification endpoints")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let auth_routes = Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login));

    // Protected routes (auth required)
    let user_routes = Router::new()
        .route("/me", get(user_handlers::get_me))
        .route(
            "/me/preferences",
            put(user_handlers::update_notification_preferences),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let reminder_routes = Router::new()
        .route(
            "/",
            get(reminder_handlers::get_reminders).post(reminder_handlers::create_reminder),
        )
        .route("/upcoming", get(reminder_handlers::get_upcoming_reminders))
        .route("/:id", delete(reminder_handlers::delete_reminder))
        .route("/:id/paid", patch(reminder_handlers::mark_reminder_paid))
        .route("/:id/snooze", patch(reminder_handlers::snooze_reminder))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let subscription_routes = Router::new()
        .route(
            "/",
            get(subscription_handlers::get_subscriptions)
                .post(subscription_handlers::create_subscription),
        )
        .route(
            "/summary",
            get(subscription_handlers::get_subscription_summary),
        )
        .route("/:id", delete(subscription_handlers::delete_subscription))
        .route(
            "/:id/cancel",
            patch(subscription_handlers::cancel_subscription),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let expense_routes = Router::new()
        .route(
            "/",
            get(expense_handlers::get_expenses).post(expense_handlers::create_expense),
        )
        .route("/summary", get(expense_handlers::get_expense_summary))
        .route("/:id", delete(expense_handlers::delete_expense))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let document_routes = Router::new()
        .route(
            "/",
            get(document_handlers::get_documents).post(document_handlers::create_document),
        )
        .route("/:id", delete(document_handlers::delete_document))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // The batch trigger is for external schedulers and sits outside the
    // bearer-auth layer; it carries its own shared-secret check.
    let notification_routes = Router::new()
        .route("/", get(notification_handlers::get_notifications))
        .route("/send", post(notification_handlers::send_notification))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .route("/run", post(notification_handlers::run_notifications));

    // Combine all routes
    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/reminders", reminder_routes)
        .nest("/subscriptions", subscription_routes)
        .nest("/expenses", expense_routes)
        .nest("/documents", document_routes)
        .nest("/notifications", notification_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state)
}
