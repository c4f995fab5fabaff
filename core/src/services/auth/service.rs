//! Main authentication service implementation

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Uuid;

use mb_shared::utils::validation::{
    is_gmail_address, is_strong_password, is_valid_email, normalize_email,
};

use crate::domain::entities::User;
use crate::domain::value_objects::{Address, PatientSnapshot};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{DoctorRepository, UserRepository};
use crate::services::email::EmailService;
use crate::services::token::{TokenRole, TokenService};

use super::config::AuthServiceConfig;

/// Length of the raw verification token in bytes; hex-encoded on the wire.
const VERIFICATION_TOKEN_BYTES: usize = 32;

/// What `register_user` did, so the API can word its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// A verification email is on its way; the account stays unverified
    /// until the link is followed.
    VerificationEmailSent,
    /// Verification is disabled on this deployment; the account is usable
    /// immediately.
    VerifiedImmediately,
}

/// Edited profile fields, applied as one unit.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub name: String,
    pub phone: String,
    pub dob: String,
    pub gender: String,
    pub address: Address,
    /// Already-hosted image URL; `None` keeps the current picture
    pub image: Option<String>,
}

/// Authentication service for accounts on both sides of the platform
pub struct AuthService<U, D>
where
    U: UserRepository,
    D: DoctorRepository,
{
    /// User repository for account persistence
    user_repository: Arc<U>,
    /// Doctor repository for doctor-panel login
    doctor_repository: Arc<D>,
    /// Email delivery for verification mails
    email_service: Arc<dyn EmailService>,
    /// Token service for session tokens
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, D> AuthService<U, D>
where
    U: UserRepository,
    D: DoctorRepository,
{
    pub fn new(
        user_repository: Arc<U>,
        doctor_repository: Arc<D>,
        email_service: Arc<dyn EmailService>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            doctor_repository,
            email_service,
            token_service,
            config,
        }
    }

    /// Register a patient account.
    ///
    /// Only Gmail addresses are accepted. A fresh account (or an existing
    /// unverified one, which is overwritten in place) gets a single-use
    /// verification token and a best-effort verification email; with
    /// verification disabled the account is marked verified on the spot.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name
    /// * `email` - Gmail address, normalized before any check
    /// * `password` - At least 8 characters
    ///
    /// # Returns
    ///
    /// * `Ok(RegistrationOutcome)` - Which wording the client should show
    /// * `Err(DomainError)` - Declined with the user-facing reason
    pub async fn register_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<RegistrationOutcome> {
        let name = name.trim();
        let email = normalize_email(email);

        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingDetails.into());
        }
        if !is_valid_email(&email) {
            return Err(AuthError::InvalidEmail.into());
        }
        if !is_gmail_address(&email) {
            return Err(AuthError::GmailRequired.into());
        }
        if !is_strong_password(password) {
            return Err(AuthError::WeakPassword.into());
        }

        let password_hash = self.hash_password(password)?;
        let existing = self.user_repository.find_by_email(&email).await?;

        let user = match existing {
            Some(user)
                if user.is_email_verified && !self.config.disable_email_verification =>
            {
                return Err(AuthError::UserAlreadyExists.into());
            }
            // Unverified leftover (or any account while verification is
            // switched off): overwrite name and password in place.
            Some(mut user) => {
                user.name = name.to_string();
                user.password_hash = password_hash;
                user.updated_at = Utc::now();
                self.prepare_verification(&mut user);
                self.user_repository.update(&user).await?;
                user
            }
            None => {
                let mut user = User::new(name.to_string(), email.clone(), password_hash);
                self.prepare_verification(&mut user);
                self.user_repository.create(&user).await?;
                user
            }
        };

        tracing::info!(
            user_id = %user.id,
            email = %user.email,
            event = "user_registered",
            "Registered patient account"
        );

        if self.config.disable_email_verification {
            return Ok(RegistrationOutcome::VerifiedImmediately);
        }

        // Best effort: a failed send is logged and registration still
        // succeeds. The user can re-register to get a fresh link.
        if let Some(token) = user.verification_token.as_deref() {
            match self
                .email_service
                .send_verification_email(&user.email, &user.name, token)
                .await
            {
                Ok(message_id) => tracing::info!(
                    user_id = %user.id,
                    message_id = %message_id,
                    provider = self.email_service.provider_name(),
                    event = "verification_email_sent",
                    "Sent verification email"
                ),
                Err(error) => tracing::warn!(
                    user_id = %user.id,
                    error = %error,
                    provider = self.email_service.provider_name(),
                    event = "verification_email_failed",
                    "Verification email could not be sent"
                ),
            }
        }

        Ok(RegistrationOutcome::VerificationEmailSent)
    }

    /// Redeem a verification token.
    ///
    /// Tokens are single use: success clears the token, so following the
    /// same link twice reports it as invalid, not expired.
    pub async fn verify_email(&self, token: &str) -> DomainResult<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::MissingVerificationToken.into());
        }

        let mut user = self
            .user_repository
            .find_by_verification_token(token)
            .await?
            .ok_or(AuthError::InvalidVerificationLink)?;

        if user.verification_expired(Utc::now()) {
            tracing::info!(
                user_id = %user.id,
                event = "verification_link_expired",
                "Verification attempted with an expired link"
            );
            return Err(AuthError::ExpiredVerificationLink.into());
        }

        user.mark_verified();
        self.user_repository.update(&user).await?;

        tracing::info!(
            user_id = %user.id,
            email = %user.email,
            event = "email_verified",
            "Email address verified"
        );
        Ok(())
    }

    /// Log a patient in and hand back a session token.
    pub async fn login_user(&self, email: &str, password: &str) -> DomainResult<String> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_email_verified {
            return Err(AuthError::EmailNotVerified.into());
        }

        if !self.verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.token_service.issue(user.id, TokenRole::User)?;
        tracing::info!(
            user_id = %user.id,
            event = "user_logged_in",
            "Patient logged in"
        );
        Ok(token)
    }

    /// Log a doctor in to the doctor panel.
    ///
    /// Unknown email and wrong password collapse into one reply so the
    /// endpoint does not reveal which doctor accounts exist.
    pub async fn login_doctor(&self, email: &str, password: &str) -> DomainResult<String> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }

        let doctor = self
            .doctor_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verify_password(password, &doctor.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.token_service.issue(doctor.id, TokenRole::Doctor)?;
        tracing::info!(
            doctor_id = %doctor.id,
            event = "doctor_logged_in",
            "Doctor logged in"
        );
        Ok(token)
    }

    /// Current profile of a patient, without credentials.
    pub async fn get_profile(&self, user_id: Uuid) -> DomainResult<PatientSnapshot> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::ProfileNotFound)?;
        Ok(PatientSnapshot::from(&user))
    }

    /// Apply profile edits. Email stays fixed.
    pub async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> DomainResult<()> {
        if update.name.trim().is_empty()
            || update.phone.trim().is_empty()
            || update.dob.trim().is_empty()
            || update.gender.trim().is_empty()
        {
            return Err(AuthError::DataMissing.into());
        }

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::ProfileNotFound)?;

        user.apply_profile(
            update.name,
            update.phone,
            update.dob,
            update.gender,
            update.address,
            update.image,
        );
        self.user_repository.update(&user).await?;

        tracing::info!(
            user_id = %user.id,
            event = "profile_updated",
            "Profile updated"
        );
        Ok(())
    }

    /// Installs verified-immediately or pending-token state on `user`,
    /// depending on the deployment switch.
    fn prepare_verification(&self, user: &mut User) {
        if self.config.disable_email_verification {
            user.mark_verified();
        } else {
            let expires_at = Utc::now() + Duration::hours(self.config.verification_expiry_hours);
            user.refresh_verification(Self::generate_verification_token(), expires_at);
        }
    }

    /// 32 random bytes from the OS, hex encoded (64 characters).
    fn generate_verification_token() -> String {
        let mut bytes = [0u8; VERIFICATION_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    fn hash_password(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.config.bcrypt_cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }

    fn verify_password(&self, password: &str, hash: &str) -> DomainResult<bool> {
        bcrypt::verify(password, hash).map_err(|e| DomainError::Internal {
            message: format!("Failed to verify password: {}", e),
        })
    }
}
