//! Patient-side endpoints: registration, sessions, profile, bookings
//! and the public doctor directory lookups.

pub mod appointments;
pub mod auth;
pub mod doctors;
pub mod profile;
