//! Unit tests for mock email service

use mb_core::services::email::{CancellationEmail, EmailService};

use crate::email::MockEmailService;

#[tokio::test]
async fn test_mock_email_send_success() {
    let service = MockEmailService::new();
    let result = service
        .send_verification_email("asha.rao@gmail.com", "Asha Rao", "token123")
        .await;

    assert!(result.is_ok());
    let message_id = result.unwrap();
    assert!(message_id.starts_with("mock_email_"));
    assert_eq!(service.sent_count(), 1);
}

#[tokio::test]
async fn test_mock_email_simulate_failure() {
    let service = MockEmailService::new();
    service.set_simulate_failure(true);

    let result = service
        .send_verification_email("asha.rao@gmail.com", "Asha Rao", "token123")
        .await;
    assert!(result.is_err());
    assert_eq!(service.sent_count(), 0);
}

#[tokio::test]
async fn test_mock_email_cancellation_notice() {
    let service = MockEmailService::new();
    let email = CancellationEmail {
        to: "asha.rao@gmail.com".to_string(),
        patient_name: "Asha Rao".to_string(),
        doctor_name: "Dr. Richard James".to_string(),
        slot_date: "15_03_2025".to_string(),
        slot_time: "10:00".to_string(),
        reason: Some("Doctor unavailable".to_string()),
    };

    let result = service.send_cancellation_email(&email).await;
    assert!(result.is_ok());
    assert_eq!(service.sent_count(), 1);
}

#[tokio::test]
async fn test_mock_email_counter() {
    let service = MockEmailService::new();

    for i in 1..=3 {
        let _ = service
            .send_verification_email("asha.rao@gmail.com", "Asha Rao", "token")
            .await;
        assert_eq!(service.sent_count(), i);
    }
}

#[test]
fn test_provider_name() {
    let service = MockEmailService::new();
    assert_eq!(service.provider_name(), "mock");
}
