use actix_web::{web, HttpResponse};
use validator::Validate;

use mb_core::repositories::{AppointmentRepository, DoctorRepository, UserRepository};
use mb_shared::ApiResponse;

use crate::dto::{
    AppointmentIdRequest, AppointmentView, AppointmentsPayload, BookAppointmentRequest,
};
use crate::handlers::{handle_domain_error, validation_failed};
use crate::middleware::auth::UserContext;
use crate::routes::AppState;

/// Handler for POST /api/user/book-appointment
///
/// Books one doctor slot for the signed-in patient.
///
/// # Request Body
///
/// ```json
/// {
///     "docId": "3f6e...",
///     "slotDate": "15_03_2025",
///     "slotTime": "10:00"
/// }
/// ```
///
/// Declines (doctor unavailable, slot already taken) answer 200 with
/// `{"success": false, "message"}`.
pub async fn book_appointment<U, D, A>(
    state: web::Data<AppState<U, D, A>>,
    user: UserContext,
    request: web::Json<BookAppointmentRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DoctorRepository + 'static,
    A: AppointmentRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_failed(errors);
    }

    match state
        .booking_service
        .book_appointment(
            user.user_id,
            request.doc_id,
            &request.slot_date,
            &request.slot_time,
        )
        .await
    {
        Ok(_) => HttpResponse::Ok().json(ApiResponse::message("Appointment booked successfully")),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/user/appointments
///
/// Lists the caller's visible appointments, newest first, each annotated
/// with a derived `status`.
pub async fn list_appointments<U, D, A>(
    state: web::Data<AppState<U, D, A>>,
    user: UserContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DoctorRepository + 'static,
    A: AppointmentRepository + 'static,
{
    match state.booking_service.list_appointments(user.user_id).await {
        Ok(appointments) => HttpResponse::Ok().json(ApiResponse::success(AppointmentsPayload {
            appointments: appointments.iter().map(AppointmentView::from).collect(),
        })),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/user/cancel-appointment
///
/// Cancels one of the caller's own appointments and releases its slot.
pub async fn cancel_appointment<U, D, A>(
    state: web::Data<AppState<U, D, A>>,
    user: UserContext,
    request: web::Json<AppointmentIdRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DoctorRepository + 'static,
    A: AppointmentRepository + 'static,
{
    match state
        .booking_service
        .cancel_appointment(user.user_id, request.appointment_id)
        .await
    {
        Ok(()) => {
            HttpResponse::Ok().json(ApiResponse::message("Appointment canceled successfully"))
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /api/user/appointments/{id}
///
/// Hides a settled appointment from the caller's history. Only cancelled
/// or completed appointments qualify; anything else is 404.
pub async fn delete_history<U, D, A>(
    state: web::Data<AppState<U, D, A>>,
    user: UserContext,
    path: web::Path<uuid::Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DoctorRepository + 'static,
    A: AppointmentRepository + 'static,
{
    match state
        .booking_service
        .delete_appointment_history(user.user_id, path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message(
            "Appointment removed from history successfully",
        )),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/user/pay-cash
///
/// Records that the fee was settled in cash at the clinic.
pub async fn pay_cash<U, D, A>(
    state: web::Data<AppState<U, D, A>>,
    user: UserContext,
    request: web::Json<AppointmentIdRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DoctorRepository + 'static,
    A: AppointmentRepository + 'static,
{
    match state
        .booking_service
        .pay_cash(user.user_id, request.appointment_id)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message("Cash payment recorded successfully")),
        Err(error) => handle_domain_error(error),
    }
}
