//! Main token service implementation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::errors::{DomainError, TokenError};

use super::claims::{Claims, TokenRole};
use super::config::TokenServiceConfig;

/// Issues and verifies HS256 session tokens.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues a session token for `subject` acting as `role`.
    ///
    /// # Returns
    /// * `Ok(token)` - Signed JWT, valid for the configured expiry window
    /// * `Err(DomainError)` - Signing failed
    pub fn issue(&self, subject: Uuid, role: TokenRole) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.config.token_expiry_hours)).timestamp(),
            jti: Uuid::new_v4().to_string(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            DomainError::Token(TokenError::TokenGenerationFailed {
                message: e.to_string(),
            })
        })
    }

    /// Verifies a session token and returns its claims.
    ///
    /// Distinguishes the failure modes so callers can log them apart:
    /// expired, forged signature, wrong issuer and plain garbage each map
    /// to their own [`TokenError`] variant.
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                let error = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        TokenError::InvalidSignature
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer
                    | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_) => {
                        TokenError::InvalidClaims {
                            message: e.to_string(),
                        }
                    }
                    _ => TokenError::InvalidTokenFormat,
                };
                DomainError::Token(error)
            })?;
        Ok(token_data.claims)
    }

    /// Verifies a session token and additionally checks it was issued for
    /// `role`. A user token presented on a doctor route fails here.
    pub fn verify_role(&self, token: &str, role: TokenRole) -> Result<Claims, DomainError> {
        let claims = self.verify(token)?;
        if claims.role != role {
            return Err(DomainError::Token(TokenError::InvalidClaims {
                message: format!("token was not issued for the {} panel", role.as_str()),
            }));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(TokenServiceConfig::default())
    }

    #[test]
    fn issued_tokens_verify_and_carry_the_subject() {
        let service = service();
        let subject = Uuid::new_v4();

        let token = service.issue(subject, TokenRole::User).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.subject_id().unwrap(), subject);
        assert_eq!(claims.role, TokenRole::User);
        assert_eq!(claims.iss, "medibook");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_tokens_are_reported_as_expired() {
        let service = TokenService::new(TokenServiceConfig {
            token_expiry_hours: -2,
            ..TokenServiceConfig::default()
        });
        let token = service.issue(Uuid::new_v4(), TokenRole::User).unwrap();

        match service.verify(&token) {
            Err(DomainError::Token(TokenError::TokenExpired)) => {}
            other => panic!("expected expired token error, got {:?}", other),
        }
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let token = service().issue(Uuid::new_v4(), TokenRole::User).unwrap();

        let other = TokenService::new(TokenServiceConfig {
            jwt_secret: "a-different-secret-entirely".to_string(),
            ..TokenServiceConfig::default()
        });
        match other.verify(&token) {
            Err(DomainError::Token(TokenError::InvalidSignature)) => {}
            other => panic!("expected signature error, got {:?}", other),
        }
    }

    #[test]
    fn garbage_tokens_are_malformed() {
        match service().verify("not-a-jwt") {
            Err(DomainError::Token(TokenError::InvalidTokenFormat)) => {}
            other => panic!("expected malformed token error, got {:?}", other),
        }
    }

    #[test]
    fn role_check_rejects_cross_panel_tokens() {
        let service = service();
        let token = service.issue(Uuid::new_v4(), TokenRole::User).unwrap();

        assert!(service.verify_role(&token, TokenRole::User).is_ok());
        match service.verify_role(&token, TokenRole::Doctor) {
            Err(DomainError::Token(TokenError::InvalidClaims { .. })) => {}
            other => panic!("expected claims error, got {:?}", other),
        }
    }
}
