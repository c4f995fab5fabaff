//! Email Delivery Module
//!
//! This module provides transactional email implementations behind the core
//! EmailService trait. It includes the Mailgun provider for production use
//! and a mock implementation for development.
//!
//! ## Features
//!
//! - **Mailgun Support**: Production email via the Mailgun messages API
//! - **Mock Implementation**: Log output for development
//! - **Security**: Recipient address masking in logs

use std::sync::Arc;

pub mod mailgun;
pub mod mock;

// Re-export commonly used types
pub use mailgun::MailgunEmailService;
pub use mock::MockEmailService;

use mb_core::services::email::EmailService;
use mb_shared::config::EmailConfig;

#[cfg(test)]
mod tests;

/// Mask an email address for log output
///
/// Keeps at most the first two characters of the local part and the whole
/// domain, e.g. `as***@gmail.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            if local.chars().count() > 2 {
                let visible: String = local.chars().take(2).collect();
                format!("{}***@{}", visible, domain)
            } else {
                format!("***@{}", domain)
            }
        }
        None => "***".to_string(),
    }
}

/// Create an email service based on configuration
///
/// Returns the implementation named by `config.provider`. Initialization
/// failures fall back to the mock so the application still starts; the
/// fallback is logged loudly.
pub fn create_email_service(config: &EmailConfig) -> Arc<dyn EmailService> {
    match config.provider.as_str() {
        "mock" => Arc::new(MockEmailService::new()),
        "mailgun" => match MailgunEmailService::new(config.clone()) {
            Ok(service) => Arc::new(service),
            Err(e) => {
                tracing::error!("Failed to initialize Mailgun email service: {}", e);
                tracing::warn!("Falling back to mock email service");
                Arc::new(MockEmailService::new())
            }
        },
        _ => {
            tracing::warn!(
                "Unknown email provider '{}', using mock implementation",
                config.provider
            );
            Arc::new(MockEmailService::new())
        }
    }
}
