//! Main status service implementation

use std::sync::Arc;

use uuid::Uuid;

use mb_shared::utils::validation::today_date_key;

use crate::domain::entities::{Appointment, AppointmentStatus};
use crate::errors::{BookingError, DomainResult};
use crate::repositories::{AppointmentRepository, DoctorRepository};
use crate::services::booking::SlotGuard;
use crate::services::email::{CancellationEmail, EmailService};

/// How many bookings the dashboard lists as recent.
const RECENT_APPOINTMENTS: usize = 5;

/// Aggregated numbers for the doctor dashboard.
///
/// Counts follow the derived status, so a closed-out no-show is neither
/// completed nor pending here; it only contributes to the total.
#[derive(Debug, Clone)]
pub struct DashboardStats {
    pub total_appointments: usize,
    pub completed_appointments: usize,
    pub cancelled_appointments: usize,
    pub pending_appointments: usize,
    pub confirmed_appointments: usize,
    /// Appointments whose slot date is today
    pub today_appointments: Vec<Appointment>,
    /// The five most recent bookings
    pub recent_appointments: Vec<Appointment>,
}

/// Doctor-side appointment transitions
pub struct StatusService<D, A>
where
    D: DoctorRepository,
    A: AppointmentRepository,
{
    doctor_repository: Arc<D>,
    appointment_repository: Arc<A>,
    /// Email delivery for cancellation notices
    email_service: Arc<dyn EmailService>,
    /// Shared with the booking service; cancellation frees a slot
    slot_guard: Arc<SlotGuard>,
}

impl<D, A> StatusService<D, A>
where
    D: DoctorRepository,
    A: AppointmentRepository,
{
    pub fn new(
        doctor_repository: Arc<D>,
        appointment_repository: Arc<A>,
        email_service: Arc<dyn EmailService>,
        slot_guard: Arc<SlotGuard>,
    ) -> Self {
        Self {
            doctor_repository,
            appointment_repository,
            email_service,
            slot_guard,
        }
    }

    /// Acknowledge a booking. Reapplying is harmless.
    pub async fn confirm_appointment(
        &self,
        doctor_id: Uuid,
        appointment_id: Uuid,
    ) -> DomainResult<()> {
        let mut appointment = self.owned_appointment(doctor_id, appointment_id).await?;
        appointment.confirm();
        self.appointment_repository.update(&appointment).await?;

        tracing::info!(
            appointment_id = %appointment_id,
            doctor_id = %doctor_id,
            event = "appointment_confirmed",
            "Appointment confirmed"
        );
        Ok(())
    }

    /// Close out a consultation, recording whether the patient showed up.
    pub async fn complete_appointment(
        &self,
        doctor_id: Uuid,
        appointment_id: Uuid,
        patient_visited: bool,
    ) -> DomainResult<()> {
        let mut appointment = self.owned_appointment(doctor_id, appointment_id).await?;
        appointment.complete(patient_visited);
        self.appointment_repository.update(&appointment).await?;

        tracing::info!(
            appointment_id = %appointment_id,
            doctor_id = %doctor_id,
            patient_visited = patient_visited,
            event = "appointment_completed",
            "Appointment completed"
        );
        Ok(())
    }

    /// Doctor-side cancellation.
    ///
    /// The record stays (flagged cancelled) so the patient still sees it;
    /// the slot returns to the calendar; the patient gets an email. Email
    /// delivery is best effort and never fails the transition.
    pub async fn cancel_appointment(
        &self,
        doctor_id: Uuid,
        appointment_id: Uuid,
        reason: Option<String>,
    ) -> DomainResult<()> {
        let mut appointment = self.owned_appointment(doctor_id, appointment_id).await?;
        appointment.cancel();
        self.appointment_repository.update(&appointment).await?;

        {
            let _held = self.slot_guard.acquire(doctor_id).await?;
            match self.doctor_repository.find_by_id(doctor_id).await? {
                Some(mut doctor) => {
                    doctor.release_slot(&appointment.slot_date, &appointment.slot_time);
                    self.doctor_repository.update(&doctor).await?;
                }
                None => tracing::warn!(
                    appointment_id = %appointment_id,
                    doctor_id = %doctor_id,
                    event = "cancel_doctor_missing",
                    "Cancelled appointment referenced an unknown doctor"
                ),
            }
        }

        let notice = CancellationEmail {
            to: appointment.patient_email.clone(),
            patient_name: appointment.patient.name.clone(),
            doctor_name: appointment.doctor.name.clone(),
            slot_date: appointment.slot_date.clone(),
            slot_time: appointment.slot_time.clone(),
            reason,
        };
        match self.email_service.send_cancellation_email(&notice).await {
            Ok(message_id) => tracing::info!(
                appointment_id = %appointment_id,
                message_id = %message_id,
                provider = self.email_service.provider_name(),
                event = "cancellation_email_sent",
                "Sent cancellation notice"
            ),
            Err(error) => tracing::warn!(
                appointment_id = %appointment_id,
                error = %error,
                provider = self.email_service.provider_name(),
                event = "cancellation_email_failed",
                "Cancellation notice could not be sent"
            ),
        }

        tracing::info!(
            appointment_id = %appointment_id,
            doctor_id = %doctor_id,
            event = "appointment_cancelled_by_doctor",
            "Appointment cancelled by doctor"
        );
        Ok(())
    }

    /// Counts, today's schedule and the latest bookings for one doctor.
    pub async fn dashboard_stats(&self, doctor_id: Uuid) -> DomainResult<DashboardStats> {
        let appointments = self.appointment_repository.find_by_doctor(doctor_id).await?;

        let mut stats = DashboardStats {
            total_appointments: appointments.len(),
            completed_appointments: 0,
            cancelled_appointments: 0,
            pending_appointments: 0,
            confirmed_appointments: 0,
            today_appointments: Vec::new(),
            recent_appointments: Vec::new(),
        };

        for appointment in &appointments {
            match appointment.derive_status() {
                AppointmentStatus::Completed => stats.completed_appointments += 1,
                AppointmentStatus::Cancelled => stats.cancelled_appointments += 1,
                AppointmentStatus::Pending => stats.pending_appointments += 1,
                AppointmentStatus::Confirmed => stats.confirmed_appointments += 1,
                AppointmentStatus::Missed => {}
            }
        }

        let today = today_date_key();
        stats.today_appointments = appointments
            .iter()
            .filter(|a| a.slot_date == today)
            .cloned()
            .collect();
        stats.recent_appointments = appointments
            .iter()
            .take(RECENT_APPOINTMENTS)
            .cloned()
            .collect();

        Ok(stats)
    }

    /// Fetch and ownership-check in one step. A foreign appointment answers
    /// exactly like a missing one.
    async fn owned_appointment(
        &self,
        doctor_id: Uuid,
        appointment_id: Uuid,
    ) -> DomainResult<Appointment> {
        let appointment = self
            .appointment_repository
            .find_by_id(appointment_id)
            .await?
            .ok_or(BookingError::AppointmentNotFound)?;
        if appointment.doctor_id != doctor_id {
            return Err(BookingError::AppointmentNotFound.into());
        }
        Ok(appointment)
    }
}
