//! Doctor repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Doctor;
use crate::errors::DomainError;

/// Repository trait for Doctor entity persistence operations
///
/// Doctors are provisioned out of band (seed data, admin tooling), so there
/// is no `create` here; `update` persists profile edits and the slot map.
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Doctor>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>, DomainError>;

    /// All doctors, for the public directory
    async fn list(&self) -> Result<Vec<Doctor>, DomainError>;

    async fn update(&self, doctor: &Doctor) -> Result<(), DomainError>;
}
