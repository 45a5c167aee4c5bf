pub mod dispatcher;
pub mod eligibility;
pub mod email;
pub mod mailer;
pub mod notification_dto;
pub mod notification_handlers;
pub mod notification_models;
pub mod notification_repository;
pub mod notification_service;

pub use dispatcher::{
    BatchSummary, IdentityResolver, NotificationDispatcher, NotificationStore, PgNotificationStore,
};
pub use mailer::{Mailer, ResendMailer};
pub use notification_models::{EmailNotification, ItemRef, NotificationType};
pub use notification_repository::NotificationRepository;
pub use notification_service::start_notification_scheduler;
