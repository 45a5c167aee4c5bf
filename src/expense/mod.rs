pub mod expense_dto;
pub mod expense_handlers;
pub mod expense_models;
pub mod expense_repository;

pub use expense_models::{CategoryTotal, Expense};
pub use expense_repository::ExpenseRepository;
