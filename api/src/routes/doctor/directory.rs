use actix_web::{web, HttpResponse};

use mb_core::repositories::{AppointmentRepository, DoctorRepository, UserRepository};
use mb_shared::ApiResponse;

use crate::dto::{DoctorView, DoctorsPayload};
use crate::handlers::handle_domain_error;
use crate::routes::AppState;

/// Handler for GET /api/doctor/list
///
/// The public directory. Every entry is credential-stripped but keeps the
/// booked-slot calendar so booking pages can grey out taken times.
pub async fn list_doctors<U, D, A>(state: web::Data<AppState<U, D, A>>) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DoctorRepository + 'static,
    A: AppointmentRepository + 'static,
{
    match state.booking_service.list_doctors().await {
        Ok(doctors) => HttpResponse::Ok().json(ApiResponse::success(DoctorsPayload {
            doctors: doctors.iter().map(DoctorView::from).collect(),
        })),
        Err(error) => handle_domain_error(error),
    }
}
