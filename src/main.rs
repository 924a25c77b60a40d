//! Gatekeep server: bootstraps the trust core and keeps it running until
//! interrupted.

use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use gatekeep_core::config::AppConfig;
use gatekeep_core::error::AppError;
use gatekeep_service::{TrustCore, VerificationCleanup};

/// How often expired verification requests are purged.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

#[tokio::main]
async fn main() {
    let profile = std::env::var("GATEKEEP_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&profile) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, &profile).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig, profile: &str) -> Result<(), AppError> {
    tracing::info!(
        profile,
        "Starting Gatekeep v{}",
        env!("CARGO_PKG_VERSION")
    );

    let core = TrustCore::bootstrap(&config).await?;

    let cleanup =
        VerificationCleanup::new(core.verification.clone(), CLEANUP_INTERVAL).spawn();

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::internal(format!("Failed to listen for shutdown signal: {e}")))?;
    tracing::info!("Shutdown signal received");

    cleanup.abort();
    core.shutdown().await;
    tracing::info!("Gatekeep stopped");
    Ok(())
}
