//! Authentication service module
//!
//! Registration with Gmail-only email verification, user and doctor login,
//! and patient profile reads/updates.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::{AuthService, ProfileUpdate, RegistrationOutcome};
