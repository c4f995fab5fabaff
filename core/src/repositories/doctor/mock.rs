//! Mock implementation of DoctorRepository for testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Doctor;
use crate::errors::DomainError;

use super::DoctorRepository;

/// In-memory DoctorRepository backed by a Vec, for tests
pub struct MockDoctorRepository {
    doctors: Arc<Mutex<Vec<Doctor>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockDoctorRepository {
    pub fn new() -> Self {
        Self {
            doctors: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    pub fn insert(&self, doctor: Doctor) {
        self.doctors.lock().unwrap().push(doctor);
    }

    /// Replace a stored doctor in place (insert when absent)
    pub fn replace(&self, doctor: Doctor) {
        let mut doctors = self.doctors.lock().unwrap();
        match doctors.iter_mut().find(|d| d.id == doctor.id) {
            Some(stored) => *stored = doctor,
            None => doctors.push(doctor),
        }
    }

    /// Fetch a stored doctor for assertions
    pub fn get(&self, id: Uuid) -> Option<Doctor> {
        self.doctors.lock().unwrap().iter().find(|d| d.id == id).cloned()
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

impl Default for MockDoctorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DoctorRepository for MockDoctorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Doctor>, DomainError> {
        self.check_failure()?;
        let doctors = self.doctors.lock().unwrap();
        Ok(doctors.iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>, DomainError> {
        self.check_failure()?;
        let doctors = self.doctors.lock().unwrap();
        Ok(doctors.iter().find(|d| d.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<Doctor>, DomainError> {
        self.check_failure()?;
        Ok(self.doctors.lock().unwrap().clone())
    }

    async fn update(&self, doctor: &Doctor) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut doctors = self.doctors.lock().unwrap();
        match doctors.iter_mut().find(|d| d.id == doctor.id) {
            Some(stored) => {
                *stored = doctor.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: format!("doctor {}", doctor.id),
            }),
        }
    }
}
