use actix_web::{web, HttpResponse};
use validator::Validate;

use mb_core::repositories::{AppointmentRepository, DoctorRepository, UserRepository};
use mb_shared::ApiResponse;

use crate::dto::{DoctorLoginRequest, TokenPayload};
use crate::handlers::{handle_domain_error, validation_failed};
use crate::routes::AppState;

/// Handler for POST /api/doctor/login
///
/// Exchanges doctor credentials for a panel token. The token goes into
/// the `dtoken` header on subsequent panel calls and never works against
/// patient endpoints.
pub async fn login<U, D, A>(
    state: web::Data<AppState<U, D, A>>,
    request: web::Json<DoctorLoginRequest>,
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
        .auth_service
        .login_doctor(&request.email, &request.password)
        .await
    {
        Ok(token) => HttpResponse::Ok().json(ApiResponse::success(TokenPayload { token })),
        Err(error) => handle_domain_error(error),
    }
}
