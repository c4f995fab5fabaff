//! Request shapes for the patient-facing routes.
//!
//! Field names follow the frontends' camelCase wire convention. The DTOs
//! only bound the shape of the payload; account policy (Gmail domain,
//! password strength, required profile fields) lives in the core services
//! so that declined requests keep their product wording.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use mb_core::domain::value_objects::Address;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(max = 100))]
    pub name: String,

    /// Gmail address; the domain policy is enforced by the service
    #[validate(length(max = 254))]
    pub email: String,

    /// At least 8 characters, checked by the service
    #[validate(length(max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(max = 254))]
    pub email: String,

    #[validate(length(max = 128))]
    pub password: String,
}

/// Query string of the verification landing link
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyEmailQuery {
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100))]
    pub name: String,

    #[validate(length(max = 32))]
    pub phone: String,

    /// Date of birth as entered, e.g. "1990-04-12"
    #[validate(length(max = 32))]
    pub dob: String,

    #[validate(length(max = 32))]
    pub gender: String,

    pub address: Address,

    /// Already-hosted image URL; omit to keep the current picture
    #[validate(length(max = 2048))]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub doc_id: Uuid,

    /// Date key, `DD_MM_YYYY`
    #[validate(length(max = 16))]
    pub slot_date: String,

    /// Time label, e.g. "10:00"; emptiness is declined by the service
    #[validate(length(max = 16))]
    pub slot_time: String,
}

/// Body of cancel-appointment and pay-cash
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentIdRequest {
    pub appointment_id: Uuid,
}
