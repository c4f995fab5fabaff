//! JWT claims carried by session tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

/// Which side of the platform a token grants access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenRole {
    User,
    Doctor,
}

impl TokenRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenRole::User => "user",
            TokenRole::Doctor => "doctor",
        }
    }
}

/// Claims encoded into every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user or doctor id
    pub sub: String,
    /// Which panel the token is for
    pub role: TokenRole,
    /// Issued-at, Unix seconds
    pub iat: i64,
    /// Expiry, Unix seconds
    pub exp: i64,
    /// Unique token id
    pub jti: String,
    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Parses the subject claim back into an id.
    pub fn subject_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::InvalidClaims {
            message: "subject is not a valid id".to_string(),
        })
    }
}
