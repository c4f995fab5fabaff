//! Main booking service implementation

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::{Appointment, Doctor};
use crate::errors::{BookingError, DomainResult};
use crate::repositories::{AppointmentRepository, DoctorRepository, UserRepository};

use super::slot_guard::SlotGuard;

/// Booking service for the patient side of the platform
pub struct BookingService<U, D, A>
where
    U: UserRepository,
    D: DoctorRepository,
    A: AppointmentRepository,
{
    user_repository: Arc<U>,
    doctor_repository: Arc<D>,
    appointment_repository: Arc<A>,
    /// Shared with the status service, which also mutates slot maps
    slot_guard: Arc<SlotGuard>,
}

impl<U, D, A> BookingService<U, D, A>
where
    U: UserRepository,
    D: DoctorRepository,
    A: AppointmentRepository,
{
    pub fn new(
        user_repository: Arc<U>,
        doctor_repository: Arc<D>,
        appointment_repository: Arc<A>,
        slot_guard: Arc<SlotGuard>,
    ) -> Self {
        Self {
            user_repository,
            doctor_repository,
            appointment_repository,
            slot_guard,
        }
    }

    /// Book `slot_time` on `slot_date` with a doctor.
    ///
    /// The whole check-and-reserve sequence runs under the doctor's slot
    /// guard, so two concurrent requests for one slot cannot both pass the
    /// availability check. The doctor's calendar is persisted before the
    /// appointment is created; if that second write fails the reserved time
    /// is released again (best effort, logged).
    ///
    /// # Arguments
    ///
    /// * `user_id` - The booking patient
    /// * `doctor_id` - The doctor to book
    /// * `slot_date` - Date key, `DD_MM_YYYY`
    /// * `slot_time` - Time label shown to the patient
    ///
    /// # Returns
    ///
    /// * `Ok(Appointment)` - The created booking
    /// * `Err(DomainError)` - Declined with the user-facing reason
    pub async fn book_appointment(
        &self,
        user_id: Uuid,
        doctor_id: Uuid,
        slot_date: &str,
        slot_time: &str,
    ) -> DomainResult<Appointment> {
        if slot_time.trim().is_empty() {
            return Err(BookingError::MissingSlotTime.into());
        }

        let _held = self.slot_guard.acquire(doctor_id).await?;

        let mut doctor = self
            .doctor_repository
            .find_by_id(doctor_id)
            .await?
            .ok_or(BookingError::DoctorNotFound)?;

        if !doctor.available {
            return Err(BookingError::DoctorUnavailable.into());
        }
        if !doctor.reserve_slot(slot_date, slot_time) {
            return Err(BookingError::SlotTaken.into());
        }

        // Resolve the patient before any write, so a dangling session
        // cannot leave a reserved slot behind.
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(BookingError::UserDataNotFound)?;

        self.doctor_repository.update(&doctor).await?;

        let appointment =
            Appointment::new(&user, &doctor, slot_date.to_string(), slot_time.to_string());
        if let Err(create_error) = self.appointment_repository.create(&appointment).await {
            doctor.release_slot(slot_date, slot_time);
            if let Err(release_error) = self.doctor_repository.update(&doctor).await {
                tracing::error!(
                    doctor_id = %doctor_id,
                    slot_date = slot_date,
                    slot_time = slot_time,
                    error = %release_error,
                    event = "slot_release_failed",
                    "Could not release reserved slot after failed booking"
                );
            }
            return Err(create_error);
        }

        tracing::info!(
            appointment_id = %appointment.id,
            user_id = %user_id,
            doctor_id = %doctor_id,
            slot_date = slot_date,
            slot_time = slot_time,
            event = "appointment_booked",
            "Appointment booked"
        );
        Ok(appointment)
    }

    /// Patient-side cancellation: the record is deleted outright and the
    /// slot returns to the doctor's calendar.
    pub async fn cancel_appointment(
        &self,
        user_id: Uuid,
        appointment_id: Uuid,
    ) -> DomainResult<()> {
        let deleted = self
            .appointment_repository
            .delete_owned(appointment_id, user_id)
            .await?
            .ok_or(BookingError::NotFoundOrUnauthorized)?;

        let _held = self.slot_guard.acquire(deleted.doctor_id).await?;
        match self.doctor_repository.find_by_id(deleted.doctor_id).await? {
            Some(mut doctor) => {
                doctor.release_slot(&deleted.slot_date, &deleted.slot_time);
                self.doctor_repository.update(&doctor).await?;
            }
            None => tracing::warn!(
                appointment_id = %appointment_id,
                doctor_id = %deleted.doctor_id,
                event = "cancel_doctor_missing",
                "Cancelled appointment referenced an unknown doctor"
            ),
        }

        tracing::info!(
            appointment_id = %appointment_id,
            user_id = %user_id,
            event = "appointment_cancelled_by_user",
            "Appointment cancelled by patient"
        );
        Ok(())
    }

    /// Remove a finished appointment from the patient's history.
    ///
    /// Only cancelled or completed records qualify; the slot map is never
    /// touched here.
    pub async fn delete_appointment_history(
        &self,
        user_id: Uuid,
        appointment_id: Uuid,
    ) -> DomainResult<()> {
        let deleted = self
            .appointment_repository
            .delete_history(appointment_id, user_id)
            .await?;
        if !deleted {
            return Err(BookingError::HistoryDeleteNotAllowed.into());
        }

        tracing::info!(
            appointment_id = %appointment_id,
            user_id = %user_id,
            event = "appointment_history_deleted",
            "Appointment removed from history"
        );
        Ok(())
    }

    /// The patient's visible appointments, newest booking first.
    pub async fn list_appointments(&self, user_id: Uuid) -> DomainResult<Vec<Appointment>> {
        self.appointment_repository.find_by_user(user_id).await
    }

    /// Record that the patient settled the fee in cash at the clinic.
    ///
    /// Cancelled appointments answer exactly like foreign ones, so the
    /// reply does not reveal whether the id exists.
    pub async fn pay_cash(&self, user_id: Uuid, appointment_id: Uuid) -> DomainResult<()> {
        let mut appointment = self
            .appointment_repository
            .find_by_id(appointment_id)
            .await?
            .ok_or(BookingError::NotFoundOrUnauthorized)?;

        if appointment.user_id != user_id || appointment.cancelled {
            return Err(BookingError::NotFoundOrUnauthorized.into());
        }

        appointment.record_cash_payment("user");
        self.appointment_repository.update(&appointment).await?;

        tracing::info!(
            appointment_id = %appointment_id,
            user_id = %user_id,
            event = "cash_payment_recorded",
            "Cash payment recorded"
        );
        Ok(())
    }

    /// Directory lookup of one doctor.
    pub async fn get_doctor(&self, doctor_id: Uuid) -> DomainResult<Doctor> {
        self.doctor_repository
            .find_by_id(doctor_id)
            .await?
            .ok_or_else(|| BookingError::DoctorNotFound.into())
    }

    /// The whole directory.
    pub async fn list_doctors(&self) -> DomainResult<Vec<Doctor>> {
        self.doctor_repository.list().await
    }
}
