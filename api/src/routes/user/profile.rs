use actix_web::{web, HttpResponse};
use validator::Validate;

use mb_core::repositories::{AppointmentRepository, DoctorRepository, UserRepository};
use mb_core::services::ProfileUpdate;
use mb_shared::ApiResponse;

use crate::dto::{ProfilePayload, UpdateProfileRequest};
use crate::handlers::{handle_domain_error, validation_failed};
use crate::middleware::auth::UserContext;
use crate::routes::AppState;

/// Handler for GET /api/user/get-profile
///
/// Answers `{"success": true, "userData": {...}}` for the account behind
/// the bearer token. No password material is ever included.
pub async fn get_profile<U, D, A>(
    state: web::Data<AppState<U, D, A>>,
    user: UserContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DoctorRepository + 'static,
    A: AppointmentRepository + 'static,
{
    match state.auth_service.get_profile(user.user_id).await {
        Ok(snapshot) => HttpResponse::Ok().json(ApiResponse::success(ProfilePayload {
            user_data: snapshot,
        })),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/user/update-profile
///
/// Replaces the editable profile fields in one shot. Name, phone, dob and
/// gender are all required; a missing image keeps the current picture.
pub async fn update_profile<U, D, A>(
    state: web::Data<AppState<U, D, A>>,
    user: UserContext,
    request: web::Json<UpdateProfileRequest>,
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
    let update = ProfileUpdate {
        name: request.name,
        phone: request.phone,
        dob: request.dob,
        gender: request.gender,
        address: request.address,
        image: request.image,
    };

    match state.auth_service.update_profile(user.user_id, update).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message("Profile Updated")),
        Err(error) => handle_domain_error(error),
    }
}
