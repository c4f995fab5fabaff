//! Shared utilities and common types for the MediBook server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response envelope structures
//! - Utility functions (email validation, date-key formatting, etc.)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, EmailConfig, Environment, ServerConfig,
};
pub use types::ApiResponse;
pub use utils::validation;
