use actix_web::{web, HttpResponse};
use validator::Validate;

use mb_core::repositories::{AppointmentRepository, DoctorRepository, UserRepository};
use mb_core::services::RegistrationOutcome;
use mb_shared::ApiResponse;

use crate::dto::{LoginRequest, RegisterRequest, TokenPayload, VerifyEmailQuery};
use crate::handlers::{handle_domain_error, validation_failed};
use crate::routes::AppState;

const VERIFICATION_SENT: &str = "Almost there! We sent a verification link to your Gmail \
     inbox. Please verify your email to finish signing up.";
const VERIFICATION_DISABLED: &str =
    "Email verification is disabled on this server. Your account is ready, you can log in now.";
const EMAIL_VERIFIED: &str = "Email verified successfully. You can now log in.";

/// Handler for POST /api/user/register
///
/// Creates a patient account for a Gmail address. Depending on server
/// configuration the account either waits for email verification or is
/// usable immediately; the reply message tells the caller which.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Asha Rao",
///     "email": "asha.rao@gmail.com",
///     "password": "at least 8 chars"
/// }
/// ```
///
/// Declines (non-Gmail address, weak password, taken email) answer
/// 200 with `{"success": false, "message"}`.
pub async fn register<U, D, A>(
    state: web::Data<AppState<U, D, A>>,
    request: web::Json<RegisterRequest>,
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
        .register_user(&request.name, &request.email, &request.password)
        .await
    {
        Ok(RegistrationOutcome::VerificationEmailSent) => {
            HttpResponse::Ok().json(ApiResponse::message(VERIFICATION_SENT))
        }
        Ok(RegistrationOutcome::VerifiedImmediately) => {
            HttpResponse::Ok().json(ApiResponse::message(VERIFICATION_DISABLED))
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/user/login
///
/// Exchanges verified credentials for a bearer token:
/// `{"success": true, "token": "..."}`.
pub async fn login<U, D, A>(
    state: web::Data<AppState<U, D, A>>,
    request: web::Json<LoginRequest>,
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
        .login_user(&request.email, &request.password)
        .await
    {
        Ok(token) => HttpResponse::Ok().json(ApiResponse::success(TokenPayload { token })),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/user/verify-email?token=...
///
/// Follows the link from the verification email. A missing token is a
/// malformed request (400); unknown and expired tokens are declines.
pub async fn verify_email<U, D, A>(
    state: web::Data<AppState<U, D, A>>,
    query: web::Query<VerifyEmailQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DoctorRepository + 'static,
    A: AppointmentRepository + 'static,
{
    let token = query.token.as_deref().unwrap_or("");
    match state.auth_service.verify_email(token).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message(EMAIL_VERIFIED)),
        Err(error) => handle_domain_error(error),
    }
}
