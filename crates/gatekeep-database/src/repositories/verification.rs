//! Verification request repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use gatekeep_core::error::{AppError, ErrorKind};
use gatekeep_core::result::AppResult;
use gatekeep_entity::verification::{CreateVerificationRequest, VerificationRequest};

use super::error::map_write_error;

/// Durable storage for verification requests.
///
/// Implementations must reject a second live request for the same
/// `(email, identifier)` with a `Conflict` error.
#[async_trait]
pub trait VerificationRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a request. Fails with `Conflict` if the pair already has one.
    async fn create(&self, data: &CreateVerificationRequest) -> AppResult<VerificationRequest>;

    /// Look a request up by its token.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<VerificationRequest>>;

    /// Look a request up by its `(email, identifier)` pair.
    async fn find_by_email_identifier(
        &self,
        email: &str,
        identifier: &str,
    ) -> AppResult<Option<VerificationRequest>>;

    /// Delete by id. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Delete the request for a pair. Returns `true` if a row was removed.
    async fn delete_by_email_identifier(&self, email: &str, identifier: &str) -> AppResult<bool>;

    /// Delete every request with `expires_at < now`. Returns the count.
    async fn delete_expired(&self, now: i64) -> AppResult<u64>;
}

/// PostgreSQL-backed [`VerificationRepository`].
#[derive(Debug, Clone)]
pub struct PgVerificationRepository {
    pool: PgPool,
}

impl PgVerificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VerificationRepository for PgVerificationRepository {
    async fn create(&self, data: &CreateVerificationRequest) -> AppResult<VerificationRequest> {
        let now = Utc::now().timestamp();
        sqlx::query_as::<_, VerificationRequest>(
            "INSERT INTO verification_requests \
             (id, token, identifier, email, expires_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.token)
        .bind(&data.identifier)
        .bind(&data.email)
        .bind(data.expires_at)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create verification request"))
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<VerificationRequest>> {
        sqlx::query_as::<_, VerificationRequest>(
            "SELECT * FROM verification_requests WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to find verification request by token",
                e,
            )
        })
    }

    async fn find_by_email_identifier(
        &self,
        email: &str,
        identifier: &str,
    ) -> AppResult<Option<VerificationRequest>> {
        sqlx::query_as::<_, VerificationRequest>(
            "SELECT * FROM verification_requests WHERE email = $1 AND identifier = $2",
        )
        .bind(email)
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to find verification request by email",
                e,
            )
        })
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM verification_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to delete verification request",
                    e,
                )
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_email_identifier(&self, email: &str, identifier: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM verification_requests WHERE email = $1 AND identifier = $2",
        )
        .bind(email)
        .bind(identifier)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to delete verification request by email",
                e,
            )
        })?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM verification_requests WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to purge expired verification requests",
                    e,
                )
            })?;
        Ok(result.rows_affected())
    }
}
