//! Appointment repository module.

mod r#trait;
pub use r#trait::AppointmentRepository;

mod mock;
pub use mock::MockAppointmentRepository;
