//! Status service module
//!
//! Doctor-initiated appointment transitions (confirm, complete, cancel with
//! patient notification) and the doctor dashboard aggregation.

mod service;

#[cfg(test)]
mod tests;

pub use service::{DashboardStats, StatusService};
