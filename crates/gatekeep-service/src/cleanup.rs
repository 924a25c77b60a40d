//! Periodic removal of expired verification requests.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info};

use gatekeep_auth::verification::VerificationTokenManager;

/// Runs [`VerificationTokenManager::purge_expired`] on an interval.
#[derive(Debug, Clone)]
pub struct VerificationCleanup {
    manager: Arc<VerificationTokenManager>,
    interval: Duration,
}

impl VerificationCleanup {
    pub fn new(manager: Arc<VerificationTokenManager>, interval: Duration) -> Self {
        Self { manager, interval }
    }

    /// Run one purge, logging rather than returning failures.
    pub async fn run_once(&self) -> u64 {
        match self.manager.purge_expired().await {
            Ok(removed) => removed,
            Err(e) => {
                error!(error = %e, "Verification cleanup failed");
                0
            }
        }
    }

    /// Spawn the loop. Abort the handle to stop it.
    pub fn spawn(self) -> JoinHandle<()> {
        info!(interval_secs = self.interval.as_secs(), "Starting verification cleanup");
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.run_once().await;
            }
        })
    }
}
