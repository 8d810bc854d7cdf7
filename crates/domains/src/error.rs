//! # DomainError
//!
//! Centralized error handling for the post board.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// No post exists with the given id
    #[error("post not found with id {0}")]
    NotFound(i64),

    /// Validation failure (e.g., empty title, negative vote counter)
    #[error("validation error: {0}")]
    Validation(String),

    /// Page request outside the accepted range
    #[error("invalid page request: {0}")]
    InvalidPage(String),

    /// Sort key string that no known `SortKey` maps to
    #[error("unknown sort key: {0:?}")]
    UnknownSortKey(String),

    /// Resource already exists (duplicate post id)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure (e.g., DB down); propagated unchanged, never retried here
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

/// A specialized Result type for post-board logic.
pub type Result<T> = std::result::Result<T, DomainError>;
