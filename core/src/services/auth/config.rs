//! Configuration for the authentication service

use mb_shared::config::AuthConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
    /// How long a verification link stays valid
    pub verification_expiry_hours: i64,
    /// Deployment switch: skip email verification entirely and mark new
    /// accounts verified on registration
    pub disable_email_verification: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 10,
            verification_expiry_hours: 24,
            disable_email_verification: false,
        }
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            bcrypt_cost: config.bcrypt_cost,
            verification_expiry_hours: config.verification_expiry_hours,
            disable_email_verification: config.disable_email_verification,
        }
    }
}
