//! Shared mocks and fixtures for status service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::{Appointment, Doctor, User};
use crate::domain::value_objects::Address;
use crate::repositories::{MockAppointmentRepository, MockDoctorRepository};
use crate::services::booking::SlotGuard;
use crate::services::email::{CancellationEmail, EmailService};
use crate::services::status::StatusService;

/// EmailService that records cancellation notices instead of delivering.
pub struct RecordingEmailService {
    cancellations: Arc<Mutex<Vec<CancellationEmail>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl RecordingEmailService {
    pub fn new() -> Self {
        Self {
            cancellations: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock().unwrap() = fail;
    }

    pub fn cancellations(&self) -> Vec<CancellationEmail> {
        self.cancellations.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailService for RecordingEmailService {
    async fn send_verification_email(
        &self,
        _to: &str,
        _recipient_name: &str,
        _token: &str,
    ) -> Result<String, String> {
        Ok("unused".to_string())
    }

    async fn send_cancellation_email(&self, email: &CancellationEmail) -> Result<String, String> {
        if *self.should_fail.lock().unwrap() {
            return Err("recording mock set to fail".to_string());
        }
        self.cancellations.lock().unwrap().push(email.clone());
        Ok("recorded".to_string())
    }

    fn provider_name(&self) -> &str {
        "recording"
    }
}

pub struct TestHarness {
    pub service: StatusService<MockDoctorRepository, MockAppointmentRepository>,
    pub doctors: Arc<MockDoctorRepository>,
    pub appointments: Arc<MockAppointmentRepository>,
    pub emails: Arc<RecordingEmailService>,
}

pub fn build_harness() -> TestHarness {
    let doctors = Arc::new(MockDoctorRepository::new());
    let appointments = Arc::new(MockAppointmentRepository::new());
    let emails = Arc::new(RecordingEmailService::new());
    let service = StatusService::new(
        doctors.clone(),
        appointments.clone(),
        emails.clone(),
        Arc::new(SlotGuard::new()),
    );
    TestHarness {
        service,
        doctors,
        appointments,
        emails,
    }
}

pub fn seed_doctor(harness: &TestHarness) -> Doctor {
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
        available: true,
        fees: 50,
        address: Address::default(),
        slots_booked: HashMap::new(),
        created_at: now,
        updated_at: now,
    };
    harness.doctors.insert(doctor.clone());
    doctor
}

/// Books `slot_time` on `slot_date` directly into the mock stores, keeping
/// the doctor's calendar in sync like the booking service would.
pub fn seed_appointment(
    harness: &TestHarness,
    doctor: &Doctor,
    slot_date: &str,
    slot_time: &str,
) -> Appointment {
    let mut user = User::new(
        "Asha Rao".to_string(),
        format!("asha.rao+{}@gmail.com", Uuid::new_v4().simple()),
        "$2b$04$hash".to_string(),
    );
    user.mark_verified();

    let mut stored_doctor = harness.doctors.get(doctor.id).unwrap();
    stored_doctor.reserve_slot(slot_date, slot_time);
    harness.doctors.replace(stored_doctor.clone());

    let appointment = Appointment::new(
        &user,
        &stored_doctor,
        slot_date.to_string(),
        slot_time.to_string(),
    );
    harness.appointments.insert(appointment.clone());
    appointment
}
