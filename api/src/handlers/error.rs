//! Maps domain outcomes onto the envelope the frontends consume.
//!
//! Business declines answer HTTP 200 with `{"success": false, "message"}`
//! and the frontends toast the message. Only two declines deviate: a
//! verify-email call without a token is a malformed request (400), and a
//! history delete that matches nothing is 404. Faults never leak details,
//! they answer 500 with a generic message.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use validator::ValidationErrors;

use mb_core::errors::{AuthError, BookingError, DomainError};
use mb_shared::ApiResponse;

use crate::middleware::auth::NOT_AUTHORIZED;

const INTERNAL_ERROR: &str = "An internal error occurred";
const INVALID_REQUEST: &str = "Invalid request data";

/// Convert a domain error into the HTTP reply the caller expects.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    if error.is_decline() {
        let status = match &error {
            DomainError::Auth(AuthError::MissingVerificationToken) => StatusCode::BAD_REQUEST,
            DomainError::Booking(BookingError::HistoryDeleteNotAllowed) => StatusCode::NOT_FOUND,
            _ => StatusCode::OK,
        };
        log::warn!("Request declined: {error}");
        return HttpResponse::build(status).json(ApiResponse::declined(error.to_string()));
    }

    match error {
        DomainError::Token(_) | DomainError::Unauthorized => {
            log::warn!("Rejected credentials: {error}");
            HttpResponse::Unauthorized().json(ApiResponse::declined(NOT_AUTHORIZED))
        }
        other => {
            log::error!("API error: {other:?}");
            HttpResponse::InternalServerError().json(ApiResponse::declined(INTERNAL_ERROR))
        }
    }
}

/// Reply for payloads that failed DTO validation before reaching a service.
pub fn validation_failed(errors: ValidationErrors) -> HttpResponse {
    log::warn!("Payload validation failed: {errors}");
    HttpResponse::BadRequest().json(ApiResponse::declined(INVALID_REQUEST))
}
