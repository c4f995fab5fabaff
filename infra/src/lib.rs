//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the MediBook backend,
//! following Clean Architecture principles. It provides concrete
//! implementations for the persistence and delivery seams the core crate
//! defines as traits.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL repository implementations using SQLx
//! - **Email**: Transactional email providers (Mailgun, console mock)

// Re-export core types for convenience
pub use mb_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Email delivery module - External email providers
pub mod email;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email delivery error
    #[error("Email delivery error: {0}")]
    Email(String),
}
