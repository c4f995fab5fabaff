//! Response shapes projected from domain entities.
//!
//! Directory and appointment payloads keep the camelCase names the
//! frontends were written against (`docId`, `userData`, `slotsBooked`).
//! Doctor views never carry the login email or the password hash.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use mb_core::domain::entities::{Appointment, AppointmentStatus, Doctor};
use mb_core::domain::value_objects::{Address, DoctorSnapshot, PatientSnapshot};
use mb_core::services::DashboardStats;

/// One doctor as the public directory shows them, credentials stripped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorView {
    pub id: Uuid,
    pub name: String,
    pub image: String,
    pub speciality: String,
    pub degree: String,
    pub experience: String,
    pub about: String,
    pub available: bool,
    pub fees: u32,
    pub address: Address,
    /// Taken times per date key, so the booking page can grey them out
    pub slots_booked: HashMap<String, Vec<String>>,
}

impl From<&Doctor> for DoctorView {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name.clone(),
            image: doctor.image.clone(),
            speciality: doctor.speciality.clone(),
            degree: doctor.degree.clone(),
            experience: doctor.experience.clone(),
            about: doctor.about.clone(),
            available: doctor.available,
            fees: doctor.fees,
            address: doctor.address.clone(),
            slots_booked: doctor.slots_booked.clone(),
        }
    }
}

/// One appointment as both panels render it, annotated with the status
/// derived from the stored flags.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentView {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "docId")]
    pub doctor_id: Uuid,
    pub user_data: PatientSnapshot,
    #[serde(rename = "docData")]
    pub doctor_data: DoctorSnapshot,
    pub amount: u32,
    pub slot_date: String,
    pub slot_time: String,
    pub booked_at: DateTime<Utc>,
    pub cancelled: bool,
    pub is_completed: bool,
    pub is_confirmed: bool,
    pub patient_visited: bool,
    pub payment: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub status: AppointmentStatus,
}

impl From<&Appointment> for AppointmentView {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id,
            user_id: appointment.user_id,
            doctor_id: appointment.doctor_id,
            user_data: appointment.patient.clone(),
            doctor_data: appointment.doctor.clone(),
            amount: appointment.amount,
            slot_date: appointment.slot_date.clone(),
            slot_time: appointment.slot_time.clone(),
            booked_at: appointment.booked_at,
            cancelled: appointment.cancelled,
            is_completed: appointment.is_completed,
            is_confirmed: appointment.is_confirmed,
            patient_visited: appointment.patient_visited,
            payment: appointment.payment,
            payment_method: appointment.payment_method.clone(),
            status: appointment.derive_status(),
        }
    }
}

/// Dashboard numbers in the panel's wire shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsView {
    pub total_appointments: usize,
    pub completed_appointments: usize,
    pub cancelled_appointments: usize,
    pub pending_appointments: usize,
    pub confirmed_appointments: usize,
    pub today_appointments: Vec<AppointmentView>,
    pub recent_appointments: Vec<AppointmentView>,
}

impl From<&DashboardStats> for DashboardStatsView {
    fn from(stats: &DashboardStats) -> Self {
        Self {
            total_appointments: stats.total_appointments,
            completed_appointments: stats.completed_appointments,
            cancelled_appointments: stats.cancelled_appointments,
            pending_appointments: stats.pending_appointments,
            confirmed_appointments: stats.confirmed_appointments,
            today_appointments: stats.today_appointments.iter().map(Into::into).collect(),
            recent_appointments: stats.recent_appointments.iter().map(Into::into).collect(),
        }
    }
}

// Envelope payloads: each struct is flattened beside the `success` flag,
// giving replies like `{"success": true, "token": "..."}`.

#[derive(Debug, Clone, Serialize)]
pub struct TokenPayload {
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub user_data: PatientSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentsPayload {
    pub appointments: Vec<AppointmentView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorsPayload {
    pub doctors: Vec<DoctorView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorPayload {
    pub doctor: DoctorView,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsPayload {
    pub stats: DashboardStatsView,
}
