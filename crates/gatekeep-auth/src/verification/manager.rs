//! Verification token lifecycle: issue, validate, consume.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use gatekeep_core::env::{EnvStore, keys};
use gatekeep_core::error::{AppError, ErrorKind};
use gatekeep_core::result::AppResult;
use gatekeep_database::repositories::VerificationRepository;
use gatekeep_entity::verification::{
    CreateVerificationRequest, VerificationIdentifier, VerificationRequest,
};

use crate::email::{EmailDispatcher, EmailSender};

use super::claims::VerificationClaims;
use super::signer::TokenSigner;

/// Lifetime of every verification token, whatever its purpose.
pub const VERIFICATION_EXPIRY_MINUTES: i64 = 30;

/// Issues and checks single-use verification tokens.
///
/// A token is valid only while its stored request exists and has not
/// expired. At most one request is live per `(email, identifier)`; issuing a
/// new one replaces the old.
#[derive(Debug, Clone)]
pub struct VerificationTokenManager {
    repo: Arc<dyn VerificationRepository>,
    signer: Arc<dyn TokenSigner>,
    env: Arc<EnvStore>,
    email: EmailDispatcher,
    expiry: Duration,
}

impl VerificationTokenManager {
    pub fn new(
        repo: Arc<dyn VerificationRepository>,
        signer: Arc<dyn TokenSigner>,
        env: Arc<EnvStore>,
        email_sender: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            repo,
            signer,
            env,
            email: EmailDispatcher::new(email_sender),
            expiry: Duration::minutes(VERIFICATION_EXPIRY_MINUTES),
        }
    }

    /// Replace the token lifetime.
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    /// Fail with `Disabled` if the flags switch off this purpose.
    pub fn ensure_enabled(&self, identifier: VerificationIdentifier) -> AppResult<()> {
        if self.env.get_bool(keys::DISABLE_EMAIL_VERIFICATION) {
            return Err(AppError::disabled("email verification is disabled"));
        }

        match identifier {
            VerificationIdentifier::MagicLinkLogin
                if self.env.get_bool(keys::DISABLE_MAGIC_LINK_LOGIN) =>
            {
                Err(AppError::disabled("magic link login is disabled"))
            }
            VerificationIdentifier::BasicAuthSignup | VerificationIdentifier::ForgotPassword
                if self.env.get_bool(keys::DISABLE_BASIC_AUTHENTICATION) =>
            {
                Err(AppError::disabled("basic authentication is disabled"))
            }
            _ => Ok(()),
        }
    }

    /// Issue a token for `email`, persist it, and send it.
    ///
    /// Any earlier live request for the same email and purpose is replaced.
    /// Delivery happens in the background and never fails this call.
    #[instrument(skip_all, fields(identifier = %identifier))]
    pub async fn issue(&self, email: &str, identifier: VerificationIdentifier) -> AppResult<String> {
        self.ensure_enabled(identifier)?;

        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::validation("email is required"));
        }

        let now = Utc::now();
        let expires_at = (now + self.expiry).timestamp();
        let claims = VerificationClaims {
            email: email.clone(),
            identifier,
            iat: now.timestamp(),
            exp: expires_at,
            jti: Uuid::new_v4(),
        };
        let token = self.signer.sign(&claims)?;

        let data = CreateVerificationRequest {
            token: token.clone(),
            identifier: identifier.as_str().to_string(),
            email: email.clone(),
            expires_at,
        };

        let request = match self.repo.create(&data).await {
            Err(e) if e.is(ErrorKind::Conflict) => {
                debug!("Replacing live verification request");
                self.repo
                    .delete_by_email_identifier(&data.email, &data.identifier)
                    .await?;
                self.repo.create(&data).await?
            }
            other => other?,
        };

        info!(request_id = %request.id, expires_at, "Verification request issued");
        self.email.dispatch(email, token.clone(), identifier);
        Ok(token)
    }

    /// Check a presented token without consuming it.
    ///
    /// Signature is checked before any lookup. A stored request past its
    /// expiry is `Expired` even when the signature is valid.
    pub async fn validate(&self, token: &str) -> AppResult<VerificationRequest> {
        let claims = self.signer.verify(token)?;

        let request = self
            .repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("No verification request for token"))?;

        if request.is_expired_at(Utc::now().timestamp()) {
            warn!(request_id = %request.id, "Expired verification token presented");
            return Err(AppError::expired(format!(
                "Verification request expired at {}",
                request.expires_at
            )));
        }

        if claims.email != request.email || claims.identifier.as_str() != request.identifier {
            return Err(AppError::invalid_token(
                "Token claims do not match the stored request",
            ));
        }

        Ok(request)
    }

    /// Delete a validated request so its token cannot be used again.
    pub async fn consume(&self, request: &VerificationRequest) -> AppResult<()> {
        if !self.repo.delete(request.id).await? {
            return Err(AppError::not_found("Verification request already consumed"));
        }
        debug!(request_id = %request.id, "Verification request consumed");
        Ok(())
    }

    /// Validate and consume in one step.
    pub async fn validate_and_consume(&self, token: &str) -> AppResult<VerificationRequest> {
        let request = self.validate(token).await?;
        self.consume(&request).await?;
        Ok(request)
    }

    /// Delete every expired request. Returns how many were removed.
    pub async fn purge_expired(&self) -> AppResult<u64> {
        let removed = self.repo.delete_expired(Utc::now().timestamp()).await?;
        if removed > 0 {
            info!(removed, "Purged expired verification requests");
        }
        Ok(removed)
    }
}
