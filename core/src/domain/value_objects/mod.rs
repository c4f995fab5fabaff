//! Immutable value objects shared across entities and the wire.

pub mod address;
pub mod payment;
pub mod snapshots;

pub use address::Address;
pub use payment::PaymentRecord;
pub use snapshots::{DoctorSnapshot, PatientSnapshot};
