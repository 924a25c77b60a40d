//! Schema migrations for the `env` and `verification_requests` tables.

use tracing::info;

use gatekeep_core::error::{AppError, ErrorKind};
use gatekeep_core::result::AppResult;

use crate::connection::DatabasePool;

/// Apply every pending migration.
pub async fn run_migrations(db: &DatabasePool) -> AppResult<()> {
    info!("Running database migrations");

    sqlx::migrate!("../../migrations")
        .run(db.pool())
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database migrations applied");
    Ok(())
}
