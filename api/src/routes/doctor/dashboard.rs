use actix_web::{web, HttpResponse};

use mb_core::repositories::{AppointmentRepository, DoctorRepository, UserRepository};
use mb_shared::ApiResponse;

use crate::dto::{DashboardStatsView, StatsPayload};
use crate::handlers::handle_domain_error;
use crate::middleware::auth::DoctorContext;
use crate::routes::AppState;

/// Handler for GET /api/doctor/dashboard-stats
///
/// Counts per status plus today's schedule and the five most recent
/// bookings, answered as `{"success": true, "stats": {...}}`.
pub async fn dashboard_stats<U, D, A>(
    state: web::Data<AppState<U, D, A>>,
    doctor: DoctorContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DoctorRepository + 'static,
    A: AppointmentRepository + 'static,
{
    match state.status_service.dashboard_stats(doctor.doctor_id).await {
        Ok(stats) => HttpResponse::Ok().json(ApiResponse::success(StatsPayload {
            stats: DashboardStatsView::from(&stats),
        })),
        Err(error) => handle_domain_error(error),
    }
}
