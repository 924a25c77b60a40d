//! In-memory env record repository.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use gatekeep_core::error::AppError;
use gatekeep_core::result::AppResult;
use gatekeep_entity::env::{CreateEnvRecord, EnvRecord};

use crate::repositories::EnvRepository;

/// Holds at most one env record.
#[derive(Debug, Default)]
pub struct MemoryEnvRepository {
    record: RwLock<Option<EnvRecord>>,
}

impl MemoryEnvRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnvRepository for MemoryEnvRepository {
    async fn find(&self) -> AppResult<Option<EnvRecord>> {
        Ok(self.record.read().await.clone())
    }

    async fn create(&self, data: &CreateEnvRecord) -> AppResult<EnvRecord> {
        let mut slot = self.record.write().await;
        if slot.is_some() {
            return Err(AppError::conflict("Env record already exists"));
        }

        let now = Utc::now().timestamp();
        let record = EnvRecord {
            id: Uuid::new_v4(),
            hash: data.hash.clone(),
            data: data.data.clone(),
            created_at: now,
            updated_at: now,
        };
        *slot = Some(record.clone());
        Ok(record)
    }

    async fn update(&self, record: &EnvRecord) -> AppResult<EnvRecord> {
        let mut slot = self.record.write().await;
        match slot.as_mut() {
            Some(stored) if stored.id == record.id => {
                stored.hash = record.hash.clone();
                stored.data = record.data.clone();
                stored.updated_at = Utc::now().timestamp();
                Ok(stored.clone())
            }
            _ => Err(AppError::not_found(format!(
                "Env record {} not found",
                record.id
            ))),
        }
    }
}
