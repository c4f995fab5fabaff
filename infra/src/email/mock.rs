//! Mock email service for development and tests.
//!
//! Instead of calling a provider it logs every message, so the verification
//! flow can be exercised locally by copying the token out of the log.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::info;

use mb_core::services::email::{CancellationEmail, EmailService};

/// Email service that records sends instead of delivering them
#[derive(Debug, Default)]
pub struct MockEmailService {
    sent_count: AtomicUsize,
    simulate_failure: AtomicBool,
}

impl MockEmailService {
    /// Create a new mock email service
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle simulated delivery failure
    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    /// Number of messages accepted so far
    pub fn sent_count(&self) -> usize {
        self.sent_count.load(Ordering::SeqCst)
    }

    fn record_send(&self) -> Result<String, String> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err("Simulated email delivery failure".to_string());
        }
        let n = self.sent_count.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("mock_email_{}", n))
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_verification_email(
        &self,
        to: &str,
        recipient_name: &str,
        token: &str,
    ) -> Result<String, String> {
        let message_id = self.record_send()?;
        info!(
            to = to,
            recipient_name = recipient_name,
            token = token,
            "[mock email] verification email"
        );
        Ok(message_id)
    }

    async fn send_cancellation_email(
        &self,
        email: &CancellationEmail,
    ) -> Result<String, String> {
        let message_id = self.record_send()?;
        info!(
            to = %email.to,
            doctor = %email.doctor_name,
            slot_date = %email.slot_date,
            slot_time = %email.slot_time,
            reason = ?email.reason,
            "[mock email] cancellation notice"
        );
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
