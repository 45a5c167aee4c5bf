pub mod document_dto;
pub mod document_handlers;
pub mod document_models;
pub mod document_repository;

pub use document_models::FinancialDocument;
pub use document_repository::DocumentRepository;
