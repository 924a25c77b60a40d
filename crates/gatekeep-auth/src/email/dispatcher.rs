//! Detached email delivery.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error};

use gatekeep_entity::verification::VerificationIdentifier;

use super::sender::EmailSender;

/// Hands verification emails to an [`EmailSender`] on a background task.
///
/// The caller never waits for delivery. Failures are logged and dropped;
/// nothing is retried.
#[derive(Debug, Clone)]
pub struct EmailDispatcher {
    sender: Arc<dyn EmailSender>,
}

impl EmailDispatcher {
    pub fn new(sender: Arc<dyn EmailSender>) -> Self {
        Self { sender }
    }

    /// Spawn delivery. The handle may be ignored.
    pub fn dispatch(
        &self,
        email: String,
        token: String,
        identifier: VerificationIdentifier,
    ) -> JoinHandle<()> {
        let sender = Arc::clone(&self.sender);
        tokio::spawn(async move {
            match sender.send_verification(&email, &token, identifier).await {
                Ok(()) => debug!(email = %email, identifier = %identifier, "Verification email sent"),
                Err(e) => error!(
                    email = %email,
                    identifier = %identifier,
                    error = %e,
                    "Failed to send verification email"
                ),
            }
        })
    }
}
