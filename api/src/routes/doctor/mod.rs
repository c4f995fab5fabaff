//! Doctor-panel endpoints: login, appointment status transitions, the
//! dashboard, plus the public directory listing.

pub mod appointments;
pub mod auth;
pub mod dashboard;
pub mod directory;
