//! Outbound mail transport boundary.

use async_trait::async_trait;
use tracing::info;

use gatekeep_core::result::AppResult;
use gatekeep_entity::verification::VerificationIdentifier;

/// Sends the email that carries a verification token.
#[async_trait]
pub trait EmailSender: Send + Sync + std::fmt::Debug + 'static {
    async fn send_verification(
        &self,
        email: &str,
        token: &str,
        identifier: VerificationIdentifier,
    ) -> AppResult<()>;
}

/// Writes a log line instead of sending mail. Used when no SMTP transport
/// is wired in.
#[derive(Debug, Clone, Default)]
pub struct TracingEmailSender;

#[async_trait]
impl EmailSender for TracingEmailSender {
    async fn send_verification(
        &self,
        email: &str,
        _token: &str,
        identifier: VerificationIdentifier,
    ) -> AppResult<()> {
        info!(email, identifier = %identifier, "Verification email queued");
        Ok(())
    }
}
