use actix_web::{web, HttpResponse};
use uuid::Uuid;

use mb_core::errors::{BookingError, DomainError};
use mb_core::repositories::{AppointmentRepository, DoctorRepository, UserRepository};
use mb_shared::ApiResponse;

use crate::dto::{DoctorPayload, DoctorView};
use crate::handlers::handle_domain_error;
use crate::routes::AppState;

/// Handler for GET /api/user/doctor/{doctorId}
///
/// Public profile of one doctor for the booking page. An unknown id is a
/// plain 404 here, unlike booking declines which answer 200.
pub async fn get_doctor<U, D, A>(
    state: web::Data<AppState<U, D, A>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DoctorRepository + 'static,
    A: AppointmentRepository + 'static,
{
    match state.booking_service.get_doctor(path.into_inner()).await {
        Ok(doctor) => HttpResponse::Ok().json(ApiResponse::success(DoctorPayload {
            doctor: DoctorView::from(&doctor),
        })),
        Err(DomainError::Booking(BookingError::DoctorNotFound)) => HttpResponse::NotFound()
            .json(ApiResponse::declined(
                BookingError::DoctorNotFound.to_string(),
            )),
        Err(error) => handle_domain_error(error),
    }
}
