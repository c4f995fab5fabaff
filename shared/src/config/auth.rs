//! Authentication and account-verification configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Token signing and account-verification policy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT secret key for signing session tokens
    pub jwt_secret: String,

    /// Session token expiry in hours
    pub token_expiry_hours: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,

    /// Verification link lifetime in hours
    pub verification_expiry_hours: i64,

    /// When set, new accounts are verified immediately and no email is sent
    #[serde(default)]
    pub disable_email_verification: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from(DEFAULT_SECRET),
            token_expiry_hours: 24,
            issuer: String::from("medibook"),
            bcrypt_cost: 10,
            verification_expiry_hours: 24,
            disable_email_verification: false,
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let jwt_secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());
        let token_expiry_hours = std::env::var("TOKEN_EXPIRY_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);
        let verification_expiry_hours = std::env::var("VERIFICATION_EXPIRY_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);
        let disable_email_verification = std::env::var("DISABLE_EMAIL_VERIFICATION")
            .map(|v| v == "true")
            .unwrap_or(false);

        Self {
            jwt_secret,
            token_expiry_hours,
            verification_expiry_hours,
            disable_email_verification,
            ..Default::default()
        }
    }

    /// Check if using the default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_SECRET
    }
}
