//! Patient account entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::value_objects::Address;

/// Placeholder avatar assigned to accounts until the user uploads a picture.
pub const DEFAULT_AVATAR: &str = "/assets/default-avatar.png";

/// A patient account.
///
/// Accounts start unverified: registration stores a verification token and
/// its expiry, and login is refused until [`User::mark_verified`] has run.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Login email, unique and normalized to lowercase
    pub email: String,
    /// Bcrypt hash of the password
    pub password_hash: String,
    /// Contact phone, free-form
    pub phone: String,
    /// Date of birth, free-form ("Not Selected" until chosen)
    pub dob: String,
    /// Gender, free-form ("Not Selected" until chosen)
    pub gender: String,
    /// Postal address
    pub address: Address,
    /// Avatar URL
    pub image: String,
    /// Whether the email has been verified
    pub is_email_verified: bool,
    /// Pending verification token, cleared once used
    pub verification_token: Option<String>,
    /// Expiry of the pending verification token
    pub verification_expires: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates an unverified account with profile fields at their defaults.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            phone: "000000000".to_string(),
            dob: "Not Selected".to_string(),
            gender: "Not Selected".to_string(),
            address: Address::default(),
            image: DEFAULT_AVATAR.to_string(),
            is_email_verified: false,
            verification_token: None,
            verification_expires: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Installs a fresh verification token, replacing any pending one.
    pub fn refresh_verification(&mut self, token: String, expires_at: DateTime<Utc>) {
        self.verification_token = Some(token);
        self.verification_expires = Some(expires_at);
        self.is_email_verified = false;
        self.updated_at = Utc::now();
    }

    /// Marks the email verified and invalidates the pending token.
    pub fn mark_verified(&mut self) {
        self.is_email_verified = true;
        self.verification_token = None;
        self.verification_expires = None;
        self.updated_at = Utc::now();
    }

    /// Whether the pending verification token has expired at `now`.
    ///
    /// Registration always records an expiry alongside the token; a record
    /// without one is accepted rather than locking the account out.
    pub fn verification_expired(&self, now: DateTime<Utc>) -> bool {
        match self.verification_expires {
            Some(expires_at) => expires_at < now,
            None => false,
        }
    }

    /// Applies an edited profile. The email is not editable.
    pub fn apply_profile(
        &mut self,
        name: String,
        phone: String,
        dob: String,
        gender: String,
        address: Address,
        image: Option<String>,
    ) {
        self.name = name;
        self.phone = phone;
        self.dob = dob;
        self.gender = gender;
        self.address = address;
        if let Some(image) = image {
            self.image = image;
        }
        self.updated_at = Utc::now();
    }
}
