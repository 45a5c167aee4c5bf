pub mod reminder_dto;
pub mod reminder_handlers;
pub mod reminder_models;
pub mod reminder_repository;
pub mod reminder_service;

pub use reminder_models::{Reminder, ReminderCategory, ReminderPriority};
pub use reminder_repository::ReminderRepository;
pub use reminder_service::ReminderService;
