//! Token service module for JWT session management
//!
//! Issues and verifies the HS256 session tokens carried by user and doctor
//! requests. Tokens expire; verification distinguishes expired, malformed
//! and forged tokens.

mod claims;
mod config;
mod service;

pub use claims::{Claims, TokenRole};
pub use config::TokenServiceConfig;
pub use service::TokenService;
