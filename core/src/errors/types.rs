//! Specific error enums for authentication, booking and token handling.
//!
//! Each variant's display string is the verbatim message returned to a
//! client when the operation is declined.

use thiserror::Error;

/// Authentication and account errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("Missing Details")]
    MissingDetails,

    #[error("Enter a valid Email")]
    InvalidEmail,

    #[error("Registration requires a valid Gmail address.")]
    GmailRequired,

    #[error("Enter a strong password")]
    WeakPassword,

    #[error("User already exists. Please login.")]
    UserAlreadyExists,

    #[error("Missing credentials")]
    MissingCredentials,

    #[error("User doesn't exist")]
    UserNotFound,

    #[error("Please verify your email before logging in.")]
    EmailNotVerified,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Verification token is required.")]
    MissingVerificationToken,

    #[error("Verification link is invalid. Please request a new one.")]
    InvalidVerificationLink,

    #[error("Verification link has expired. Please register again to receive a new link.")]
    ExpiredVerificationLink,

    #[error("User not found")]
    ProfileNotFound,

    #[error("Data Missing")]
    DataMissing,
}

/// Appointment and slot booking errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    #[error("Please select a time slot.")]
    MissingSlotTime,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Doctor not available for booking.")]
    DoctorUnavailable,

    #[error("Slot is not available")]
    SlotTaken,

    #[error("User data not found.")]
    UserDataNotFound,

    #[error("Appointment not found or unauthorized")]
    NotFoundOrUnauthorized,

    #[error("Appointment not found or cannot be deleted")]
    HistoryDeleteNotAllowed,

    #[error("Appointment not found")]
    AppointmentNotFound,
}

/// Token errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Invalid token claims: {message}")]
    InvalidClaims { message: String },

    #[error("Token generation failed: {message}")]
    TokenGenerationFailed { message: String },
}
