//! Mailgun Email Service Implementation
//!
//! This module provides transactional email delivery using the Mailgun
//! messages API. It implements the core EmailService trait for production
//! email delivery.
//!
//! ## Features
//!
//! - Automatic retry logic with exponential backoff
//! - Rate limiting handling
//! - No retry on client errors, which will not succeed on a second attempt
//! - Security: Recipient address masking in logs

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use mb_core::services::email::{CancellationEmail, EmailService};
use mb_shared::config::EmailConfig;
use mb_shared::utils::validation::format_date_key;

use crate::email::mask_email;
use crate::InfrastructureError;

/// Base URL of the Mailgun messages API
const MAILGUN_API_BASE: &str = "https://api.mailgun.net/v3";

/// Successful send response from the Mailgun messages API
#[derive(Debug, Deserialize)]
struct MailgunSendResponse {
    /// Provider message id, e.g. `<20260825...@mg.example>`
    id: Option<String>,
}

/// Mailgun email service implementation
pub struct MailgunEmailService {
    client: reqwest::Client,
    config: EmailConfig,
}

impl MailgunEmailService {
    /// Create a new Mailgun email service
    ///
    /// Fails when the API key or sending domain is missing, or when the
    /// HTTP client cannot be constructed.
    pub fn new(config: EmailConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "EMAIL_API_KEY not set".to_string(),
            ));
        }
        if config.domain.is_empty() {
            return Err(InfrastructureError::Config(
                "EMAIL_DOMAIN not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            "Mailgun email service initialized for domain: {}",
            config.domain
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(EmailConfig::from_env())
    }

    /// The verification link the email points the patient at
    fn verification_link(&self, token: &str) -> String {
        format!(
            "{}/verify-email?token={}",
            self.config.frontend_base(),
            token
        )
    }

    /// Send one message with retry logic
    async fn send_with_retry(
        &self,
        to: &str,
        subject: &str,
        text: &str,
        html: &str,
    ) -> Result<String, InfrastructureError> {
        let url = format!("{}/{}/messages", MAILGUN_API_BASE, self.config.domain);
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending email attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_email(to)
            );

            let request = self
                .client
                .post(&url)
                .basic_auth("api", Some(&self.config.api_key))
                .form(&[
                    ("from", self.config.sender.as_str()),
                    ("to", to),
                    ("subject", subject),
                    ("text", text),
                    ("html", html),
                ]);

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body: MailgunSendResponse = response.json().await?;
                        let message_id =
                            body.id.unwrap_or_else(|| "unknown".to_string());
                        info!(
                            "Email sent successfully to {} with id: {}",
                            mask_email(to),
                            message_id
                        );
                        return Ok(message_id);
                    }

                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "unreadable response body".to_string());
                    error!(
                        "Mailgun returned {} (attempt {}/{}): {}",
                        status, attempts, self.config.max_retries, error_text
                    );

                    if status.as_u16() == 429 {
                        warn!("Rate limit detected, backing off for {:?}", delay);
                    } else if status.is_server_error() {
                        warn!("Server error detected, retrying after {:?}", delay);
                    } else {
                        // Client errors will not succeed on retry.
                        return Err(InfrastructureError::Email(format!(
                            "Mailgun rejected the message ({}): {}",
                            status, error_text
                        )));
                    }

                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Email(format!(
                            "Failed to send email after {} attempts: {}",
                            self.config.max_retries, status
                        )));
                    }
                }
                Err(e) => {
                    error!(
                        "Failed to reach Mailgun (attempt {}/{}): {}",
                        attempts, self.config.max_retries, e
                    );

                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Http(e));
                    }
                }
            }

            // Wait before retrying with exponential backoff
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

#[async_trait]
impl EmailService for MailgunEmailService {
    async fn send_verification_email(
        &self,
        to: &str,
        recipient_name: &str,
        token: &str,
    ) -> Result<String, String> {
        let link = self.verification_link(token);
        let subject = "Verify your MediBook account";
        let text = format!(
            "Hi {recipient_name},\n\n\
             Please verify your email address to activate your MediBook \
             account:\n\n{link}\n\n\
             The link expires in 24 hours. If you did not create this \
             account, you can ignore this email."
        );
        let html = format!(
            "<p>Hi {recipient_name},</p>\
             <p>Please verify your email address to activate your MediBook \
             account:</p>\
             <p><a href=\"{link}\">Verify my email</a></p>\
             <p>The link expires in 24 hours. If you did not create this \
             account, you can ignore this email.</p>"
        );

        self.send_with_retry(to, subject, &text, &html)
            .await
            .map_err(|e| e.to_string())
    }

    async fn send_cancellation_email(
        &self,
        email: &CancellationEmail,
    ) -> Result<String, String> {
        let date = if email.slot_date.contains('_') {
            format_date_key(&email.slot_date)
        } else {
            "the scheduled date".to_string()
        };
        let reason_text = match &email.reason {
            Some(reason) => format!("\n\nReason given: {reason}"),
            None => String::new(),
        };
        let reason_html = match &email.reason {
            Some(reason) => format!("<p>Reason given: {reason}</p>"),
            None => String::new(),
        };

        let subject = "Your appointment was cancelled";
        let text = format!(
            "Hi {patient},\n\n\
             {doctor} has cancelled your appointment on {date} at {time}.\
             {reason_text}\n\n\
             You can book a new slot any time from your MediBook account.",
            patient = email.patient_name,
            doctor = email.doctor_name,
            time = email.slot_time,
        );
        let html = format!(
            "<p>Hi {patient},</p>\
             <p>{doctor} has cancelled your appointment on {date} at \
             {time}.</p>{reason_html}\
             <p>You can book a new slot any time from your MediBook \
             account.</p>",
            patient = email.patient_name,
            doctor = email.doctor_name,
            time = email.slot_time,
        );

        self.send_with_retry(&email.to, subject, &text, &html)
            .await
            .map_err(|e| e.to_string())
    }

    fn provider_name(&self) -> &str {
        "mailgun"
    }
}
