//! Repository interfaces for data persistence.
//!
//! Traits only; concrete implementations live in the infrastructure crate.
//! Each repository ships an in-memory mock used by service and API tests.

pub mod appointment;
pub mod doctor;
pub mod user;

pub use appointment::{AppointmentRepository, MockAppointmentRepository};
pub use doctor::{DoctorRepository, MockDoctorRepository};
pub use user::{MockUserRepository, UserRepository};
