//! Verification engine: issue, deliver and check one-time codes

use chrono::Utc;
use constant_time_eq::constant_time_eq;
use std::sync::Arc;
use std::time::Duration;

use jt_shared::utils::mask_email;

use crate::domain::entities::{PendingVerification, Purpose, RejectReason, VerifyOutcome};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::VerificationStore;

use super::code_generator::{CodeGenerator, RandomCodeGenerator};
use super::config::VerificationServiceConfig;
use super::identifier::normalize_identifier;
use super::traits::DeliveryGateway;
use super::types::IssuedCode;

/// Issues codes into a store, delivers them, and checks submissions
///
/// Collaborators may be trait objects (`Arc<dyn VerificationStore>`), so the
/// backend can be chosen at runtime.
pub struct VerificationService<S, G>
where
    S: VerificationStore + ?Sized,
    G: DeliveryGateway + ?Sized,
{
    store: Arc<S>,
    gateway: Arc<G>,
    generator: Box<dyn CodeGenerator>,
    config: VerificationServiceConfig,
}

impl<S, G> VerificationService<S, G>
where
    S: VerificationStore + ?Sized,
    G: DeliveryGateway + ?Sized,
{
    pub fn new(store: Arc<S>, gateway: Arc<G>, config: VerificationServiceConfig) -> Self {
        Self {
            store,
            gateway,
            generator: Box::new(RandomCodeGenerator),
            config,
        }
    }

    /// Replace the code generator
    pub fn with_generator(mut self, generator: Box<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Issue a code for `(identifier, purpose)` and deliver it
    ///
    /// The entry is stored before delivery and removed again if delivery
    /// fails or exceeds the configured timeout. Any earlier code for the same
    /// pair is replaced.
    ///
    /// # Errors
    /// * `AuthError::InvalidIdentifier` - malformed email
    /// * `AuthError::ResendCooldown` - a live code was issued too recently
    /// * `AuthError::DeliveryFailed` - gateway error or timeout
    pub async fn request_code(&self, identifier: &str, purpose: Purpose) -> DomainResult<IssuedCode> {
        let identifier = normalize_identifier(identifier)?;
        let masked = mask_email(&identifier);
        let now = Utc::now();

        if let Some(existing) = self.store.get(&identifier, purpose).await? {
            if let Some(retry_after) =
                existing.cooldown_remaining(self.config.resend_cooldown_seconds, now)
            {
                tracing::warn!(
                    identifier = %masked,
                    purpose = %purpose,
                    retry_after = retry_after,
                    event = "otp_resend_cooldown",
                    "Verification code requested during resend cooldown"
                );
                return Err(AuthError::ResendCooldown {
                    retry_after_seconds: retry_after,
                }
                .into());
            }
        }

        let entry = PendingVerification::issue(
            identifier.clone(),
            self.generator.generate(),
            purpose,
            self.config.code_ttl_minutes,
        );
        let code = entry.code.clone();
        let issued_at = entry.issued_at;
        let expires_at = entry.expires_at;

        self.store.put(entry).await.map_err(|e| {
            tracing::error!(
                identifier = %masked,
                error = %e,
                event = "otp_storage_failed",
                "Failed to store verification code"
            );
            e
        })?;

        let timeout = Duration::from_secs(self.config.delivery_timeout_seconds);
        let delivery = tokio::time::timeout(
            timeout,
            self.gateway
                .send_code(&identifier, &code, purpose, self.config.code_ttl_minutes),
        )
        .await;

        let message_id = match delivery {
            Ok(Ok(message_id)) => message_id,
            Ok(Err(reason)) => return Err(self.roll_back(&identifier, purpose, reason).await),
            Err(_) => {
                let reason = format!(
                    "{} did not respond within {}s",
                    self.gateway.provider_name(),
                    self.config.delivery_timeout_seconds
                );
                return Err(self.roll_back(&identifier, purpose, reason).await);
            }
        };

        tracing::info!(
            identifier = %masked,
            purpose = %purpose,
            provider = self.gateway.provider_name(),
            message_id = %message_id,
            event = "otp_issued",
            "Verification code issued and delivered"
        );

        Ok(IssuedCode {
            identifier,
            purpose,
            expires_at,
            next_resend_at: chrono::Duration::try_seconds(self.config.resend_cooldown_seconds.max(0))
                .and_then(|cooldown| issued_at.checked_add_signed(cooldown))
                .unwrap_or(expires_at),
            message_id,
        })
    }

    /// Remove the just-stored entry after a failed delivery
    async fn roll_back(&self, identifier: &str, purpose: Purpose, reason: String) -> DomainError {
        let masked = mask_email(identifier);
        if let Err(e) = self.store.delete(identifier, purpose).await {
            tracing::error!(
                identifier = %masked,
                error = %e,
                event = "otp_rollback_failed",
                "Failed to remove undelivered verification code"
            );
        }
        tracing::error!(
            identifier = %masked,
            purpose = %purpose,
            provider = self.gateway.provider_name(),
            reason = %reason,
            event = "otp_delivery_failed",
            "Verification code delivery failed"
        );
        AuthError::DeliveryFailed { reason }.into()
    }

    /// Check a submitted code
    ///
    /// An expired entry is deleted. A mismatch leaves the entry and its
    /// expiry untouched. A match consumes the entry, so a code verifies at
    /// most once.
    pub async fn verify(
        &self,
        identifier: &str,
        purpose: Purpose,
        submitted_code: &str,
    ) -> DomainResult<VerifyOutcome> {
        let identifier = normalize_identifier(identifier)?;
        let masked = mask_email(&identifier);

        let Some(entry) = self.store.get(&identifier, purpose).await? else {
            tracing::info!(
                identifier = %masked,
                purpose = %purpose,
                event = "otp_not_found",
                "No pending verification code"
            );
            return Ok(VerifyOutcome::Rejected(RejectReason::NotFound));
        };

        if entry.is_expired_at(Utc::now()) {
            self.store.delete(&identifier, purpose).await?;
            tracing::info!(
                identifier = %masked,
                purpose = %purpose,
                event = "otp_expired",
                "Verification code expired"
            );
            return Ok(VerifyOutcome::Rejected(RejectReason::Expired));
        }

        if !constant_time_eq(submitted_code.trim().as_bytes(), entry.code.as_bytes()) {
            tracing::warn!(
                identifier = %masked,
                purpose = %purpose,
                event = "otp_mismatch",
                "Invalid verification code submitted"
            );
            return Ok(VerifyOutcome::Rejected(RejectReason::Mismatch));
        }

        // A concurrent verify may have consumed it between get and delete
        if !self.store.delete(&identifier, purpose).await? {
            return Ok(VerifyOutcome::Rejected(RejectReason::NotFound));
        }

        tracing::info!(
            identifier = %masked,
            purpose = %purpose,
            event = "otp_verified",
            "Verification code accepted"
        );
        Ok(VerifyOutcome::Verified)
    }
}
