use std::io;
use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::info;

use mb_api::app::create_app;
use mb_api::routes::AppState;
use mb_core::services::{
    AuthService, AuthServiceConfig, BookingService, SlotGuard, StatusService, TokenService,
    TokenServiceConfig,
};
use mb_infra::database::{
    create_pool, run_migrations, MySqlAppointmentRepository, MySqlDoctorRepository,
    MySqlUserRepository,
};
use mb_infra::email::create_email_service;
use mb_infra::InfrastructureError;
use mb_shared::AppConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting MediBook API server");

    let config = AppConfig::from_env();
    if let Err(message) = config.validate() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, message));
    }

    let pool = create_pool(&config.database).await.map_err(to_io_error)?;
    run_migrations(&pool).await.map_err(to_io_error)?;

    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let doctor_repository = Arc::new(MySqlDoctorRepository::new(pool.clone()));
    let appointment_repository = Arc::new(MySqlAppointmentRepository::new(pool));

    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth)));
    let email_service = create_email_service(&config.email);
    let slot_guard = Arc::new(SlotGuard::new());

    let auth_service = Arc::new(AuthService::new(
        user_repository.clone(),
        doctor_repository.clone(),
        email_service.clone(),
        token_service.clone(),
        AuthServiceConfig::from(&config.auth),
    ));
    let booking_service = Arc::new(BookingService::new(
        user_repository,
        doctor_repository.clone(),
        appointment_repository.clone(),
        slot_guard.clone(),
    ));
    let status_service = Arc::new(StatusService::new(
        doctor_repository,
        appointment_repository,
        email_service,
        slot_guard,
    ));

    let app_state = web::Data::new(AppState {
        auth_service,
        booking_service,
        status_service,
        token_service,
    });

    let bind_address = config.server.bind_address();
    info!("Server listening on {}", bind_address);

    let server = HttpServer::new(move || create_app(app_state.clone()));
    let server = if config.server.workers > 0 {
        server.workers(config.server.workers)
    } else {
        server
    };

    server.bind(&bind_address)?.run().await
}

fn to_io_error(error: InfrastructureError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, error)
}
