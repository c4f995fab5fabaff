//! Business services orchestrating the domain.

pub mod auth;
pub mod booking;
pub mod email;
pub mod status;
pub mod token;

pub use auth::{AuthService, AuthServiceConfig, ProfileUpdate, RegistrationOutcome};
pub use booking::{BookingService, SlotGuard};
pub use email::{CancellationEmail, EmailService};
pub use status::{DashboardStats, StatusService};
pub use token::{Claims, TokenRole, TokenService, TokenServiceConfig};
