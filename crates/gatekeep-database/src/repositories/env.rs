//! Env record repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use gatekeep_core::error::{AppError, ErrorKind};
use gatekeep_core::result::AppResult;
use gatekeep_entity::env::{CreateEnvRecord, EnvRecord};

use super::error::map_write_error;

/// Durable storage for the single encrypted env record.
#[async_trait]
pub trait EnvRepository: Send + Sync + std::fmt::Debug + 'static {
    /// The env record, or `None` on a fresh deployment.
    async fn find(&self) -> AppResult<Option<EnvRecord>>;

    /// Insert the env record.
    async fn create(&self, data: &CreateEnvRecord) -> AppResult<EnvRecord>;

    /// Overwrite `hash` and `data` of an existing record and bump
    /// `updated_at`.
    async fn update(&self, record: &EnvRecord) -> AppResult<EnvRecord>;
}

/// PostgreSQL-backed [`EnvRepository`].
#[derive(Debug, Clone)]
pub struct PgEnvRepository {
    pool: PgPool,
}

impl PgEnvRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnvRepository for PgEnvRepository {
    async fn find(&self) -> AppResult<Option<EnvRecord>> {
        sqlx::query_as::<_, EnvRecord>("SELECT * FROM env ORDER BY created_at ASC LIMIT 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find env record", e))
    }

    async fn create(&self, data: &CreateEnvRecord) -> AppResult<EnvRecord> {
        let now = Utc::now().timestamp();
        sqlx::query_as::<_, EnvRecord>(
            "INSERT INTO env (id, hash, data, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.hash)
        .bind(&data.data)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create env record"))
    }

    async fn update(&self, record: &EnvRecord) -> AppResult<EnvRecord> {
        sqlx::query_as::<_, EnvRecord>(
            "UPDATE env SET hash = $2, data = $3, updated_at = $4 WHERE id = $1 RETURNING *",
        )
        .bind(record.id)
        .bind(&record.hash)
        .bind(&record.data)
        .bind(Utc::now().timestamp())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to update env record"))?
        .ok_or_else(|| AppError::not_found(format!("Env record {} not found", record.id)))
    }
}
