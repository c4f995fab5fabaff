//! Email delivery provider configuration

use serde::{Deserialize, Serialize};

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Email provider ("mailgun" or "mock")
    pub provider: String,

    /// Provider API key
    pub api_key: String,

    /// Provider sending domain
    pub domain: String,

    /// From address, e.g. "MediBook <no-reply@medibook.example>"
    pub sender: String,

    /// Base URL of the patient-facing frontend, used for verification links
    pub frontend_base_url: String,

    /// Maximum retry attempts for failed sends
    pub max_retries: u32,

    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,

    /// Timeout for provider API requests in seconds
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_key: String::new(),
            domain: String::new(),
            sender: String::from("MediBook <no-reply@medibook.example>"),
            frontend_base_url: String::from("http://localhost:5173"),
            max_retries: 3,
            retry_delay_ms: 1000,
            request_timeout_secs: 30,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("EMAIL_PROVIDER").unwrap_or(defaults.provider),
            api_key: std::env::var("EMAIL_API_KEY").unwrap_or_default(),
            domain: std::env::var("EMAIL_DOMAIN").unwrap_or_default(),
            sender: std::env::var("EMAIL_FROM").unwrap_or(defaults.sender),
            frontend_base_url: std::env::var("FRONTEND_URL")
                .unwrap_or(defaults.frontend_base_url),
            max_retries: std::env::var("EMAIL_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_retries),
            retry_delay_ms: std::env::var("EMAIL_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.retry_delay_ms),
            request_timeout_secs: std::env::var("EMAIL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    /// Frontend base URL with any trailing slash removed
    pub fn frontend_base(&self) -> &str {
        self.frontend_base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontend_base_strips_trailing_slash() {
        let config = EmailConfig {
            frontend_base_url: "https://app.medibook.example/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.frontend_base(), "https://app.medibook.example");
    }
}
