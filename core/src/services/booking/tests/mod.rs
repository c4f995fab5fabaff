//! Tests for booking service

#[cfg(test)]
mod mocks;
#[cfg(test)]
mod service_tests;
