//! Appointment repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Appointment;
use crate::errors::DomainError;

/// Repository trait for Appointment entity persistence operations
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, DomainError>;

    /// Appointments the patient can still see (`show_to_user`), newest
    /// booking first
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Appointment>, DomainError>;

    /// Every appointment booked with this doctor, newest booking first
    async fn find_by_doctor(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, DomainError>;

    async fn create(&self, appointment: &Appointment) -> Result<(), DomainError>;

    async fn update(&self, appointment: &Appointment) -> Result<(), DomainError>;

    /// Delete the appointment only if it belongs to `user_id`, in one
    /// operation, and return the deleted row.
    ///
    /// # Returns
    /// * `Ok(Some(appointment))` when it existed and was owned by the user
    /// * `Ok(None)` when it did not exist or belongs to someone else
    async fn delete_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Appointment>, DomainError>;

    /// Delete a finished record from the patient's history, in one
    /// operation. Succeeds only when the appointment is owned by `user_id`
    /// and is cancelled or completed.
    ///
    /// # Returns
    /// * `Ok(true)` when a row was deleted
    async fn delete_history(&self, id: Uuid, user_id: Uuid) -> Result<bool, DomainError>;
}
