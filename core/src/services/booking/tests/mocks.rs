//! Shared fixtures for booking service tests.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::{Doctor, User};
use crate::domain::value_objects::Address;
use crate::repositories::{
    MockAppointmentRepository, MockDoctorRepository, MockUserRepository,
};
use crate::services::booking::{BookingService, SlotGuard};

pub struct TestHarness {
    pub service:
        Arc<BookingService<MockUserRepository, MockDoctorRepository, MockAppointmentRepository>>,
    pub users: Arc<MockUserRepository>,
    pub doctors: Arc<MockDoctorRepository>,
    pub appointments: Arc<MockAppointmentRepository>,
}

pub fn build_harness() -> TestHarness {
    let users = Arc::new(MockUserRepository::new());
    let doctors = Arc::new(MockDoctorRepository::new());
    let appointments = Arc::new(MockAppointmentRepository::new());
    let service = Arc::new(BookingService::new(
        users.clone(),
        doctors.clone(),
        appointments.clone(),
        Arc::new(SlotGuard::new()),
    ));
    TestHarness {
        service,
        users,
        doctors,
        appointments,
    }
}

pub fn seed_user(harness: &TestHarness) -> User {
    let mut user = User::new(
        "Asha Rao".to_string(),
        format!("asha.rao+{}@gmail.com", Uuid::new_v4().simple()),
        "$2b$04$hash".to_string(),
    );
    user.mark_verified();
    harness.users.insert(user.clone());
    user
}

pub fn seed_doctor(harness: &TestHarness, available: bool) -> Doctor {
    let now = Utc::now();
    let doctor = Doctor {
        id: Uuid::new_v4(),
        name: "Dr. Richard James".to_string(),
        email: "richard.james@medibook.example".to_string(),
        password_hash: "$2b$04$hash".to_string(),
        image: "/assets/doc1.png".to_string(),
        speciality: "General physician".to_string(),
        degree: "MBBS".to_string(),
        experience: "4 Years".to_string(),
        about: "Preventive medicine.".to_string(),
        available,
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
