//! Domain-level errors (no I/O concerns)

use thiserror::Error;

/// Domain errors raised while turning documents into element trees.
///
/// Missing children, attributes or reorder targets are never errors;
/// those lookups return `Option` or an empty string.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("cannot deserialize element document: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("invalid element document: {message}")]
    InvalidDocument { message: String },

    #[error("corrupt element tree: {message}")]
    Invariant { message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
