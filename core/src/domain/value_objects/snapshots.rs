//! Denormalized profile snapshots stored inside appointments.
//!
//! Snapshots are taken at booking time and never updated afterwards, so an
//! appointment keeps showing the names, fee and addresses that were current
//! when it was booked.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Doctor, User};
use crate::domain::value_objects::Address;

/// Patient details as captured at booking time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSnapshot {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub dob: String,
    pub gender: String,
    pub address: Address,
    pub image: String,
}

impl From<&User> for PatientSnapshot {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            dob: user.dob.clone(),
            gender: user.gender.clone(),
            address: user.address.clone(),
            image: user.image.clone(),
        }
    }
}

/// Doctor details as captured at booking time. Excludes the slot calendar,
/// which keeps changing after the snapshot is taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSnapshot {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image: String,
    pub speciality: String,
    pub degree: String,
    pub experience: String,
    pub about: String,
    pub available: bool,
    pub fees: u32,
    pub address: Address,
}

impl From<&Doctor> for DoctorSnapshot {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name.clone(),
            email: doctor.email.clone(),
            image: doctor.image.clone(),
            speciality: doctor.speciality.clone(),
            degree: doctor.degree.clone(),
            experience: doctor.experience.clone(),
            about: doctor.about.clone(),
            available: doctor.available,
            fees: doctor.fees,
            address: doctor.address.clone(),
        }
    }
}
