//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use gatekeep_core::config::SessionConfig;
use gatekeep_core::env::{MapEnv, keys};
use gatekeep_core::result::AppResult;
use gatekeep_database::memory::{MemoryEnvRepository, MemoryVerificationRepository};
use gatekeep_database::repositories::EnvRepository;
use gatekeep_entity::verification::VerificationIdentifier;
use gatekeep_auth::email::EmailSender;
use gatekeep_service::{TrustCore, TrustCoreParts};

/// One recorded verification email.
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub email: String,
    pub token: String,
    pub identifier: VerificationIdentifier,
}

/// Email sender that remembers what it was asked to send.
#[derive(Debug, Default)]
pub struct RecordingEmailSender {
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingEmailSender {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Wait until at least `count` emails were handed over.
    pub async fn wait_for(&self, count: usize) -> Vec<SentEmail> {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if self.sent.lock().unwrap().len() >= count {
                    return;
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("verification email was not dispatched");
        self.sent()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send_verification(
        &self,
        email: &str,
        token: &str,
        identifier: VerificationIdentifier,
    ) -> AppResult<()> {
        self.sent.lock().unwrap().push(SentEmail {
            email: email.to_string(),
            token: token.to_string(),
            identifier,
        });
        Ok(())
    }
}

/// Process environment with a complete SMTP configuration.
pub fn smtp_env() -> MapEnv {
    MapEnv::new()
        .with(keys::SMTP_HOST, "smtp.example.com")
        .with(keys::SMTP_PORT, "587")
        .with(keys::SMTP_USERNAME, "mailer")
        .with(keys::SMTP_PASSWORD, "hunter2")
        .with(keys::SENDER_EMAIL, "noreply@example.com")
        .with(keys::JWT_SECRET, "integration-secret")
}

/// Test application context.
pub struct TestApp {
    pub core: TrustCore,
    pub env_repo: Arc<dyn EnvRepository>,
    pub verification_repo: Arc<MemoryVerificationRepository>,
    pub mailer: Arc<RecordingEmailSender>,
}

impl TestApp {
    /// Fresh deployment with SMTP configured.
    pub async fn new() -> Self {
        Self::boot(Arc::new(MemoryEnvRepository::new()), smtp_env())
            .await
            .expect("Failed to bootstrap trust core")
    }

    /// Boot against an existing env repository, as a restarted process would.
    pub async fn boot(env_repo: Arc<dyn EnvRepository>, env: MapEnv) -> AppResult<Self> {
        let verification_repo = Arc::new(MemoryVerificationRepository::new());
        let mailer = Arc::new(RecordingEmailSender::default());

        let core = TrustCore::from_parts(TrustCoreParts {
            env_repo: Arc::clone(&env_repo),
            verification_repo: verification_repo.clone(),
            source: Arc::new(env),
            session: SessionConfig::default(),
            email_sender: mailer.clone(),
        })
        .await?;

        Ok(Self {
            core,
            env_repo,
            verification_repo,
            mailer,
        })
    }
}
