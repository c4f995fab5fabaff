//! Shared response handling for route handlers.

pub mod error;

pub use error::{handle_domain_error, validation_failed};
