//! Route handlers for the patient app and the doctor panel.

pub mod doctor;
pub mod user;

use std::sync::Arc;

use mb_core::repositories::{AppointmentRepository, DoctorRepository, UserRepository};
use mb_core::services::{AuthService, BookingService, StatusService, TokenService};

/// Shared application state injected into every handler.
pub struct AppState<U, D, A>
where
    U: UserRepository,
    D: DoctorRepository,
    A: AppointmentRepository,
{
    pub auth_service: Arc<AuthService<U, D>>,
    pub booking_service: Arc<BookingService<U, D, A>>,
    pub status_service: Arc<StatusService<D, A>>,
    pub token_service: Arc<TokenService>,
}
