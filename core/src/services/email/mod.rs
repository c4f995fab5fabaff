//! Email delivery trait consumed by the auth and status services.
//!
//! Implementations live in the infrastructure crate (REST provider client
//! plus a console mock). Callers treat delivery as best-effort: a failed
//! send is logged and never fails the operation that triggered it.

use async_trait::async_trait;

/// Everything needed to tell a patient their appointment was cancelled.
#[derive(Debug, Clone, PartialEq)]
pub struct CancellationEmail {
    /// Recipient address
    pub to: String,
    /// Patient's display name
    pub patient_name: String,
    /// Cancelling doctor's display name
    pub doctor_name: String,
    /// Date key of the cancelled slot, `DD_MM_YYYY`
    pub slot_date: String,
    /// Time label of the cancelled slot
    pub slot_time: String,
    /// Optional reason supplied by the doctor
    pub reason: Option<String>,
}

/// Trait for transactional email integration
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send the account verification email carrying `token`.
    ///
    /// Returns the provider message id on success, the provider error
    /// text on failure.
    async fn send_verification_email(
        &self,
        to: &str,
        recipient_name: &str,
        token: &str,
    ) -> Result<String, String>;

    /// Tell the patient a doctor cancelled their appointment.
    async fn send_cancellation_email(&self, email: &CancellationEmail) -> Result<String, String>;

    /// Short provider label for logs ("mailgun", "mock")
    fn provider_name(&self) -> &str;
}
