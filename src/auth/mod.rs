pub mod auth_dto;
pub mod auth_handlers;
pub mod jwt;
pub mod password;

pub use jwt::{create_jwt, verify_jwt};
pub use password::{hash_password, verify_password};
