//! Domain entities with identity and lifecycle.

pub mod appointment;
pub mod doctor;
pub mod user;

pub use appointment::{Appointment, AppointmentStatus};
pub use doctor::Doctor;
pub use user::User;
