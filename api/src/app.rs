//! Application factory.
//!
//! Builds the Actix application with its middleware stack and the full
//! route table. Kept generic over the repository implementations so the
//! integration tests can assemble the same app on top of mocks.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{middleware::Logger, web, App, Error, HttpResponse};

use mb_core::repositories::{AppointmentRepository, DoctorRepository, UserRepository};
use mb_shared::ApiResponse;

use crate::middleware::auth::{DoctorAuth, UserAuth};
use crate::middleware::cors::create_cors;
use crate::middleware::security::SecurityMiddleware;
use crate::routes::doctor::{
    appointments as doctor_appointments, auth as doctor_auth, dashboard, directory,
};
use crate::routes::user::{appointments, auth, doctors, profile};
use crate::routes::AppState;

/// Create and configure the application with all dependencies.
pub fn create_app<U, D, A>(
    app_state: web::Data<AppState<U, D, A>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    D: DoctorRepository + 'static,
    A: AppointmentRepository + 'static,
{
    let token_service = app_state.token_service.clone();

    // Malformed JSON payloads answer in the same envelope as every
    // other reply instead of Actix's plain-text default.
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ApiResponse::declined("Invalid request data"));
        actix_web::error::InternalError::from_response(err, response).into()
    });

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Middleware order matters: security outermost, then CORS, then logging
        .wrap(Logger::default())
        .wrap(create_cors())
        .wrap(SecurityMiddleware::new())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/user")
                .route("/register", web::post().to(auth::register::<U, D, A>))
                .route("/login", web::post().to(auth::login::<U, D, A>))
                .route("/verify-email", web::get().to(auth::verify_email::<U, D, A>))
                .route(
                    "/get-profile",
                    web::get()
                        .to(profile::get_profile::<U, D, A>)
                        .wrap(UserAuth::new(token_service.clone())),
                )
                .route(
                    "/update-profile",
                    web::post()
                        .to(profile::update_profile::<U, D, A>)
                        .wrap(UserAuth::new(token_service.clone())),
                )
                .route(
                    "/book-appointment",
                    web::post()
                        .to(appointments::book_appointment::<U, D, A>)
                        .wrap(UserAuth::new(token_service.clone())),
                )
                .route(
                    "/appointments",
                    web::get()
                        .to(appointments::list_appointments::<U, D, A>)
                        .wrap(UserAuth::new(token_service.clone())),
                )
                .route(
                    "/cancel-appointment",
                    web::post()
                        .to(appointments::cancel_appointment::<U, D, A>)
                        .wrap(UserAuth::new(token_service.clone())),
                )
                .route(
                    "/appointments/{id}",
                    web::delete()
                        .to(appointments::delete_history::<U, D, A>)
                        .wrap(UserAuth::new(token_service.clone())),
                )
                .route(
                    "/pay-cash",
                    web::post()
                        .to(appointments::pay_cash::<U, D, A>)
                        .wrap(UserAuth::new(token_service.clone())),
                )
                // Public: the booking page loads this before any login
                .route("/doctor/{doctorId}", web::get().to(doctors::get_doctor::<U, D, A>)),
        )
        .service(
            web::scope("/api/doctor")
                .route("/login", web::post().to(doctor_auth::login::<U, D, A>))
                .route("/list", web::get().to(directory::list_doctors::<U, D, A>))
                .route(
                    "/confirm-appointment",
                    web::put()
                        .to(doctor_appointments::confirm_appointment::<U, D, A>)
                        .wrap(DoctorAuth::new(token_service.clone())),
                )
                .route(
                    "/complete-appointment",
                    web::put()
                        .to(doctor_appointments::complete_appointment::<U, D, A>)
                        .wrap(DoctorAuth::new(token_service.clone())),
                )
                .route(
                    "/cancel-appointment",
                    web::put()
                        .to(doctor_appointments::cancel_appointment::<U, D, A>)
                        .wrap(DoctorAuth::new(token_service.clone())),
                )
                .route(
                    "/dashboard-stats",
                    web::get()
                        .to(dashboard::dashboard_stats::<U, D, A>)
                        .wrap(DoctorAuth::new(token_service)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "medibook-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::declined(
        "The requested resource was not found",
    ))
}
