//! In-memory verification request repository.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use gatekeep_core::error::AppError;
use gatekeep_core::result::AppResult;
use gatekeep_entity::verification::{CreateVerificationRequest, VerificationRequest};

use crate::repositories::VerificationRepository;

/// Verification requests keyed by id, unique per `(email, identifier)`.
#[derive(Debug, Default)]
pub struct MemoryVerificationRepository {
    requests: RwLock<HashMap<Uuid, VerificationRequest>>,
}

impl MemoryVerificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored requests.
    pub async fn len(&self) -> usize {
        self.requests.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.requests.read().await.is_empty()
    }
}

#[async_trait]
impl VerificationRepository for MemoryVerificationRepository {
    async fn create(&self, data: &CreateVerificationRequest) -> AppResult<VerificationRequest> {
        let mut requests = self.requests.write().await;
        if requests
            .values()
            .any(|r| r.email == data.email && r.identifier == data.identifier)
        {
            return Err(AppError::conflict(
                "Failed to create verification request: duplicate entry",
            ));
        }

        let now = Utc::now().timestamp();
        let request = VerificationRequest {
            id: Uuid::new_v4(),
            token: data.token.clone(),
            identifier: data.identifier.clone(),
            email: data.email.clone(),
            expires_at: data.expires_at,
            created_at: now,
            updated_at: now,
        };
        requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<VerificationRequest>> {
        Ok(self
            .requests
            .read()
            .await
            .values()
            .find(|r| r.token == token)
            .cloned())
    }

    async fn find_by_email_identifier(
        &self,
        email: &str,
        identifier: &str,
    ) -> AppResult<Option<VerificationRequest>> {
        Ok(self
            .requests
            .read()
            .await
            .values()
            .find(|r| r.email == email && r.identifier == identifier)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.requests.write().await.remove(&id).is_some())
    }

    async fn delete_by_email_identifier(&self, email: &str, identifier: &str) -> AppResult<bool> {
        let mut requests = self.requests.write().await;
        let before = requests.len();
        requests.retain(|_, r| !(r.email == email && r.identifier == identifier));
        Ok(requests.len() < before)
    }

    async fn delete_expired(&self, now: i64) -> AppResult<u64> {
        let mut requests = self.requests.write().await;
        let before = requests.len();
        requests.retain(|_, r| r.expires_at >= now);
        Ok((before - requests.len()) as u64)
    }
}
