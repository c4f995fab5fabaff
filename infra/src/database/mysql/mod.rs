//! MySQL repository implementations.

pub mod appointment_repository_impl;
pub mod doctor_repository_impl;
pub mod user_repository_impl;

pub use appointment_repository_impl::MySqlAppointmentRepository;
pub use doctor_repository_impl::MySqlDoctorRepository;
pub use user_repository_impl::MySqlUserRepository;
