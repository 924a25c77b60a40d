//! Keeping the runtime env register and its encrypted record in step.

use std::sync::Arc;

use tracing::{error, info, instrument};
use uuid::Uuid;

use gatekeep_core::crypto::{Cipher, KEY_LENGTH, decode_b64_string, encode_b64};
use gatekeep_core::env::{EnvSnapshot, EnvSource, EnvStore, keys, reconcile};
use gatekeep_core::result::AppResult;
use gatekeep_entity::env::{CreateEnvRecord, EnvRecord};

use crate::repositories::EnvRepository;

/// Bootstraps the env register from durable storage and writes it back.
#[derive(Clone)]
pub struct EnvSync {
    repo: Arc<dyn EnvRepository>,
    store: Arc<EnvStore>,
    source: Arc<dyn EnvSource>,
}

impl std::fmt::Debug for EnvSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvSync")
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

impl EnvSync {
    pub fn new(
        repo: Arc<dyn EnvRepository>,
        store: Arc<EnvStore>,
        source: Arc<dyn EnvSource>,
    ) -> Self {
        Self {
            repo,
            store,
            source,
        }
    }

    /// Load or create the env record. Runs once before serving.
    ///
    /// With no record, a fresh key is generated and the seeded register is
    /// encrypted into a new record. With a record, the stored snapshot is
    /// decrypted, reconciled against the process environment and installed;
    /// it is written back only if reconciliation changed it. A failed write
    /// is returned but the installed snapshot is kept.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self) -> AppResult<()> {
        match self.repo.find().await? {
            None => self.create_record().await,
            Some(record) => self.load_record(record).await,
        }
    }

    /// Encrypt the current register and overwrite the stored record.
    pub async fn persist(&self) -> AppResult<()> {
        let Some(mut record) = self.repo.find().await? else {
            return self.create_record().await;
        };
        record.data = self.seal(&self.store.persistable_snapshot())?;
        self.repo.update(&record).await?;
        info!("Env record updated");
        Ok(())
    }

    async fn create_record(&self) -> AppResult<()> {
        let mut key = Uuid::new_v4().to_string();
        key.truncate(KEY_LENGTH);
        self.store.set_string(keys::ENCRYPTION_KEY, key.as_str());

        let data = self.seal(&self.store.persistable_snapshot())?;
        // `hash` carries the key itself, base64-encoded, so that later boots
        // can decrypt the record.
        let record = self
            .repo
            .create(&CreateEnvRecord {
                hash: encode_b64(&key),
                data,
            })
            .await?;

        info!(record_id = %record.id, "Env record created");
        Ok(())
    }

    async fn load_record(&self, record: EnvRecord) -> AppResult<()> {
        let key = decode_b64_string(&record.hash)?;
        self.store.set_string(keys::ENCRYPTION_KEY, key.as_str());

        let plaintext = Cipher::from_key_str(&key)?.decrypt(&record.data)?;
        let mut candidate = EnvSnapshot::from_json(&plaintext)?;

        let dirty = reconcile(&mut candidate, self.source.as_ref());
        candidate.set_string(keys::ENCRYPTION_KEY, key);
        self.store.replace(candidate);

        if !dirty {
            info!(record_id = %record.id, "Env record loaded");
            return Ok(());
        }

        let data = self.seal(&self.store.persistable_snapshot())?;
        let updated = EnvRecord { data, ..record };
        if let Err(e) = self.repo.update(&updated).await {
            error!(record_id = %updated.id, error = %e, "Failed to persist reconciled env");
            return Err(e);
        }

        info!(record_id = %updated.id, "Env record reconciled with process environment");
        Ok(())
    }

    fn seal(&self, snapshot: &EnvSnapshot) -> AppResult<Vec<u8>> {
        self.store.cipher()?.encrypt(&snapshot.to_json()?)
    }
}
