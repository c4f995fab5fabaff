use actix_web::{web, HttpResponse};
use validator::Validate;

use mb_core::repositories::{AppointmentRepository, DoctorRepository, UserRepository};
use mb_shared::ApiResponse;

use crate::dto::{CancelAppointmentRequest, CompleteAppointmentRequest, ConfirmAppointmentRequest};
use crate::handlers::{handle_domain_error, validation_failed};
use crate::middleware::auth::DoctorContext;
use crate::routes::AppState;

/// Handler for PUT /api/doctor/confirm-appointment
///
/// Marks a pending appointment as confirmed. Appointments of other
/// doctors answer exactly like unknown ids.
pub async fn confirm_appointment<U, D, A>(
    state: web::Data<AppState<U, D, A>>,
    doctor: DoctorContext,
    request: web::Json<ConfirmAppointmentRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DoctorRepository + 'static,
    A: AppointmentRepository + 'static,
{
    match state
        .status_service
        .confirm_appointment(doctor.doctor_id, request.appointment_id)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message("Appointment confirmed")),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /api/doctor/complete-appointment
///
/// Closes out an appointment after its time has passed. `patientVisited`
/// records attendance; a missing field counts as a no-show.
pub async fn complete_appointment<U, D, A>(
    state: web::Data<AppState<U, D, A>>,
    doctor: DoctorContext,
    request: web::Json<CompleteAppointmentRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DoctorRepository + 'static,
    A: AppointmentRepository + 'static,
{
    match state
        .status_service
        .complete_appointment(
            doctor.doctor_id,
            request.appointment_id,
            request.patient_visited,
        )
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message("Appointment completed")),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /api/doctor/cancel-appointment
///
/// Cancels from the doctor side, releases the slot and emails the patient
/// with the optional reason.
pub async fn cancel_appointment<U, D, A>(
    state: web::Data<AppState<U, D, A>>,
    doctor: DoctorContext,
    request: web::Json<CancelAppointmentRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DoctorRepository + 'static,
    A: AppointmentRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_failed(errors);
    }

    let request = request.into_inner();
    match state
        .status_service
        .cancel_appointment(doctor.doctor_id, request.appointment_id, request.reason)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message("Appointment cancelled")),
        Err(error) => handle_domain_error(error),
    }
}
