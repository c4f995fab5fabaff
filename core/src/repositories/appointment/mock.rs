//! Mock implementation of AppointmentRepository for testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Appointment;
use crate::errors::DomainError;

use super::AppointmentRepository;

/// In-memory AppointmentRepository backed by a Vec, for tests
pub struct MockAppointmentRepository {
    appointments: Arc<Mutex<Vec<Appointment>>>,
    should_fail: Arc<Mutex<bool>>,
    fail_on_create: Arc<Mutex<bool>>,
}

impl MockAppointmentRepository {
    pub fn new() -> Self {
        Self {
            appointments: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
            fail_on_create: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    /// Fail only `create`, leaving reads working. Exercises the booking
    /// compensation path.
    pub fn set_fail_on_create(&self, fail: bool) {
        *self.fail_on_create.lock().unwrap() = fail;
    }

    pub fn insert(&self, appointment: Appointment) {
        self.appointments.lock().unwrap().push(appointment);
    }

    pub fn get(&self, id: Uuid) -> Option<Appointment> {
        self.appointments
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    pub fn all(&self) -> Vec<Appointment> {
        self.appointments.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.appointments.lock().unwrap().len()
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::Database {
                message: "Mock repository error".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockAppointmentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppointmentRepository for MockAppointmentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, DomainError> {
        self.check_failure()?;
        let appointments = self.appointments.lock().unwrap();
        Ok(appointments.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Appointment>, DomainError> {
        self.check_failure()?;
        let appointments = self.appointments.lock().unwrap();
        let mut result: Vec<Appointment> = appointments
            .iter()
            .filter(|a| a.user_id == user_id && a.show_to_user)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.booked_at.cmp(&a.booked_at));
        Ok(result)
    }

    async fn find_by_doctor(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, DomainError> {
        self.check_failure()?;
        let appointments = self.appointments.lock().unwrap();
        let mut result: Vec<Appointment> = appointments
            .iter()
            .filter(|a| a.doctor_id == doctor_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.booked_at.cmp(&a.booked_at));
        Ok(result)
    }

    async fn create(&self, appointment: &Appointment) -> Result<(), DomainError> {
        self.check_failure()?;
        if *self.fail_on_create.lock().unwrap() {
            return Err(DomainError::Database {
                message: "Mock repository error".to_string(),
            });
        }
        let mut appointments = self.appointments.lock().unwrap();
        appointments.push(appointment.clone());
        Ok(())
    }

    async fn update(&self, appointment: &Appointment) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut appointments = self.appointments.lock().unwrap();
        match appointments.iter_mut().find(|a| a.id == appointment.id) {
            Some(stored) => {
                *stored = appointment.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: format!("appointment {}", appointment.id),
            }),
        }
    }

    async fn delete_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Appointment>, DomainError> {
        self.check_failure()?;
        let mut appointments = self.appointments.lock().unwrap();
        let position = appointments
            .iter()
            .position(|a| a.id == id && a.user_id == user_id);
        Ok(position.map(|index| appointments.remove(index)))
    }

    async fn delete_history(&self, id: Uuid, user_id: Uuid) -> Result<bool, DomainError> {
        self.check_failure()?;
        let mut appointments = self.appointments.lock().unwrap();
        let position = appointments.iter().position(|a| {
            a.id == id && a.user_id == user_id && (a.cancelled || a.is_completed)
        });
        match position {
            Some(index) => {
                appointments.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
