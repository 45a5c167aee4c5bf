pub mod subscription_dto;
pub mod subscription_handlers;
pub mod subscription_models;
pub mod subscription_repository;
pub mod subscription_service;

pub use subscription_models::Subscription;
pub use subscription_repository::SubscriptionRepository;
pub use subscription_service::SubscriptionService;
