//! Tests for status service

#[cfg(test)]
mod mocks;
