//! Appointment entity, its status projection and payment record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Doctor, User};
use crate::domain::value_objects::{DoctorSnapshot, PatientSnapshot, PaymentRecord};

/// Lifecycle of an appointment, derived from the stored flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Missed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Missed => "missed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A booked consultation slot.
///
/// Patient and doctor details are denormalized at booking time so the
/// record stays readable even after either profile changes. The four status
/// flags are the stored representation; [`Appointment::derive_status`] is
/// the single authoritative projection over them.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    /// Unique identifier
    pub id: Uuid,
    /// Booking patient
    pub user_id: Uuid,
    /// Booked doctor
    pub doctor_id: Uuid,
    /// Patient details captured at booking time
    pub patient: PatientSnapshot,
    /// Doctor details captured at booking time, without the slot map
    pub doctor: DoctorSnapshot,
    /// Patient email at booking time, for notifications
    pub patient_email: String,
    /// Doctor's fee at booking time, whole currency units
    pub amount: u32,
    /// Date key, `DD_MM_YYYY`
    pub slot_date: String,
    /// Time label as shown to the patient, e.g. "10:00"
    pub slot_time: String,
    /// When the booking was made
    pub booked_at: DateTime<Utc>,
    /// Cancelled by either party
    pub cancelled: bool,
    /// Consultation took place (or was closed out)
    pub is_completed: bool,
    /// Doctor acknowledged the booking
    pub is_confirmed: bool,
    /// Patient showed up; meaningful once completed
    pub patient_visited: bool,
    /// Whether the patient's appointment list still shows this record
    pub show_to_user: bool,
    /// Payment received
    pub payment: bool,
    /// How the payment was made, e.g. "cash"
    pub payment_method: Option<String>,
    /// Details of the recorded payment
    pub payment_info: Option<PaymentRecord>,
}

impl Appointment {
    /// Books `slot_time` on `slot_date` with `doctor` for `user`, capturing
    /// both profiles and the current fee.
    pub fn new(user: &User, doctor: &Doctor, slot_date: String, slot_time: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user.id,
            doctor_id: doctor.id,
            patient: PatientSnapshot::from(user),
            doctor: DoctorSnapshot::from(doctor),
            patient_email: user.email.clone(),
            amount: doctor.fees,
            slot_date,
            slot_time,
            booked_at: Utc::now(),
            cancelled: false,
            is_completed: false,
            is_confirmed: false,
            patient_visited: false,
            show_to_user: true,
            payment: false,
            payment_method: None,
            payment_info: None,
        }
    }

    /// Projects the stored flags onto a status. Priority order: cancelled,
    /// then completed (visited or missed), then confirmed, then pending.
    pub fn derive_status(&self) -> AppointmentStatus {
        if self.cancelled {
            AppointmentStatus::Cancelled
        } else if self.is_completed {
            if self.patient_visited {
                AppointmentStatus::Completed
            } else {
                AppointmentStatus::Missed
            }
        } else if self.is_confirmed {
            AppointmentStatus::Confirmed
        } else {
            AppointmentStatus::Pending
        }
    }

    /// Doctor acknowledges the booking. Reapplying changes nothing.
    pub fn confirm(&mut self) {
        self.is_confirmed = true;
    }

    /// Closes out the consultation, recording whether the patient showed up.
    pub fn complete(&mut self, patient_visited: bool) {
        self.is_completed = true;
        self.patient_visited = patient_visited;
    }

    /// Cancels the booking.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Records an in-person cash payment on behalf of `recorded_by`
    /// ("user" or "doctor").
    pub fn record_cash_payment(&mut self, recorded_by: &str) {
        self.payment = true;
        self.payment_method = Some("cash".to_string());
        self.payment_info = Some(PaymentRecord {
            method: "cash".to_string(),
            recorded_at: Utc::now(),
            recorded_by: recorded_by.to_string(),
        });
    }

    /// Whether the patient may remove this record from their history.
    pub fn can_delete_from_history(&self) -> bool {
        self.cancelled || self.is_completed
    }
}
