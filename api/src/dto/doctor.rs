//! Request shapes for the doctor-panel routes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DoctorLoginRequest {
    #[validate(length(max = 254))]
    pub email: String,

    #[validate(length(max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmAppointmentRequest {
    pub appointment_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteAppointmentRequest {
    pub appointment_id: Uuid,

    /// Whether the patient showed up; a missing field counts as a no-show
    #[serde(default)]
    pub patient_visited: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CancelAppointmentRequest {
    pub appointment_id: Uuid,

    /// Optional reason relayed to the patient in the cancellation email
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}
