//! Shared setup for the API integration tests: the full application
//! assembled over in-memory repositories.

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::web;
use chrono::Utc;
use uuid::Uuid;

use mb_api::routes::AppState;
use mb_core::domain::entities::{Doctor, User};
use mb_core::domain::value_objects::Address;
use mb_core::repositories::{MockAppointmentRepository, MockDoctorRepository, MockUserRepository};
use mb_core::services::{
    AuthService, AuthServiceConfig, BookingService, SlotGuard, StatusService, TokenRole,
    TokenService, TokenServiceConfig,
};
use mb_infra::email::MockEmailService;

pub type MockState = AppState<MockUserRepository, MockDoctorRepository, MockAppointmentRepository>;

pub struct TestHarness {
    pub users: Arc<MockUserRepository>,
    pub doctors: Arc<MockDoctorRepository>,
    pub appointments: Arc<MockAppointmentRepository>,
    pub state: web::Data<MockState>,
}

/// Harness with email verification enabled, the production default.
pub fn harness() -> TestHarness {
    harness_with(AuthServiceConfig {
        bcrypt_cost: 4,
        ..AuthServiceConfig::default()
    })
}

pub fn harness_with(config: AuthServiceConfig) -> TestHarness {
    let users = Arc::new(MockUserRepository::new());
    let doctors = Arc::new(MockDoctorRepository::new());
    let appointments = Arc::new(MockAppointmentRepository::new());
    let email = Arc::new(MockEmailService::new());
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::default()));
    let slot_guard = Arc::new(SlotGuard::new());

    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        doctors.clone(),
        email.clone(),
        token_service.clone(),
        config,
    ));
    let booking_service = Arc::new(BookingService::new(
        users.clone(),
        doctors.clone(),
        appointments.clone(),
        slot_guard.clone(),
    ));
    let status_service = Arc::new(StatusService::new(
        doctors.clone(),
        appointments.clone(),
        email,
        slot_guard,
    ));

    let state = web::Data::new(AppState {
        auth_service,
        booking_service,
        status_service,
        token_service,
    });

    TestHarness {
        users,
        doctors,
        appointments,
        state,
    }
}

/// Seed an already-verified patient account whose password actually
/// verifies, skipping the register-and-click-the-link dance.
pub fn seed_verified_user(harness: &TestHarness, email: &str, password: &str) -> User {
    let mut user = User::new(
        "Asha Rao".to_string(),
        email.to_string(),
        bcrypt::hash(password, 4).unwrap(),
    );
    user.mark_verified();
    harness.users.insert(user.clone());
    user
}

/// Bearer token for a patient session.
pub fn user_token(harness: &TestHarness, user_id: Uuid) -> String {
    harness
        .state
        .token_service
        .issue(user_id, TokenRole::User)
        .unwrap()
}

/// Panel token for a doctor session, sent in the `dtoken` header.
pub fn doctor_token(harness: &TestHarness, doctor_id: Uuid) -> String {
    harness
        .state
        .token_service
        .issue(doctor_id, TokenRole::Doctor)
        .unwrap()
}

/// Seed a directory doctor whose password actually verifies.
pub fn seed_doctor(harness: &TestHarness, email: &str, password: &str) -> Doctor {
    let now = Utc::now();
    let doctor = Doctor {
        id: Uuid::new_v4(),
        name: "Dr. Richard James".to_string(),
        email: email.to_string(),
        password_hash: bcrypt::hash(password, 4).unwrap(),
        image: "/assets/doc1.png".to_string(),
        speciality: "General physician".to_string(),
        degree: "MBBS".to_string(),
        experience: "4 Years".to_string(),
        about: "Dr. James focuses on preventive medicine.".to_string(),
        available: true,
        fees: 50,
        address: Address {
            line1: "17th Cross, Richmond".to_string(),
            line2: "Circle, Ring Road, London".to_string(),
        },
        slots_booked: HashMap::new(),
        created_at: now,
        updated_at: now,
    };
    harness.doctors.insert(doctor.clone());
    doctor
}
