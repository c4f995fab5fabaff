//! Database module - MySQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management
//! - Repository pattern implementations

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::{create_pool, run_migrations};
pub use mysql::{MySqlAppointmentRepository, MySqlDoctorRepository, MySqlUserRepository};
