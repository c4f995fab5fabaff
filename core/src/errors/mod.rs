//! Domain-specific error types and error handling.
//!
//! Declined operations are values, not failures: the `AuthError` and
//! `BookingError` display strings are the exact messages clients show to
//! people, so changing them is a product decision.

mod types;

pub use types::{AuthError, BookingError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Business rule violation: {message}")]
    BusinessRule { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Whether this error is a declined domain operation rather than a fault.
    ///
    /// Declines carry user-facing copy and answer with HTTP 200; faults
    /// (database, internal) answer with a generic 500.
    pub fn is_decline(&self) -> bool {
        matches!(
            self,
            DomainError::Validation { .. }
                | DomainError::BusinessRule { .. }
                | DomainError::NotFound { .. }
                | DomainError::Auth(_)
                | DomainError::Booking(_)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
