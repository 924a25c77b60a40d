//! Integration tests for env bootstrap across process restarts.

use std::sync::Arc;

use async_trait::async_trait;

use gatekeep_core::AppError;
use gatekeep_core::crypto::{Cipher, decode_b64_string};
use gatekeep_core::env::{EnvSnapshot, EnvStore, MapEnv, keys};
use gatekeep_core::error::ErrorKind;
use gatekeep_core::result::AppResult;
use gatekeep_database::EnvSync;
use gatekeep_database::memory::MemoryEnvRepository;
use gatekeep_database::repositories::EnvRepository;
use gatekeep_entity::env::{CreateEnvRecord, EnvRecord};

use crate::helpers::{TestApp, smtp_env};

/// Env repository whose writes after creation always fail.
#[derive(Debug)]
struct ReadOnlyEnvRepository(Arc<MemoryEnvRepository>);

#[async_trait]
impl EnvRepository for ReadOnlyEnvRepository {
    async fn find(&self) -> AppResult<Option<EnvRecord>> {
        self.0.find().await
    }

    async fn create(&self, data: &CreateEnvRecord) -> AppResult<EnvRecord> {
        self.0.create(data).await
    }

    async fn update(&self, _record: &EnvRecord) -> AppResult<EnvRecord> {
        Err(AppError::database("read-only replica"))
    }
}

async fn stored_snapshot(repo: &dyn EnvRepository) -> EnvSnapshot {
    let record = repo.find().await.unwrap().unwrap();
    let key = decode_b64_string(&record.hash).unwrap();
    let plaintext = Cipher::from_key_str(&key)
        .unwrap()
        .decrypt(&record.data)
        .unwrap();
    EnvSnapshot::from_json(&plaintext).unwrap()
}

#[tokio::test]
async fn test_env_overrides_stored_flag_until_removed() {
    let app = TestApp::new().await;
    assert!(!app.core.env.get_bool(keys::DISABLE_MAGIC_LINK_LOGIN));

    let overridden = smtp_env().with(keys::DISABLE_MAGIC_LINK_LOGIN, "true");
    let app = TestApp::boot(Arc::clone(&app.env_repo), overridden)
        .await
        .unwrap();
    assert!(app.core.env.get_bool(keys::DISABLE_MAGIC_LINK_LOGIN));
    assert!(stored_snapshot(app.env_repo.as_ref()).await.flag(keys::DISABLE_MAGIC_LINK_LOGIN));

    // Unset in the environment: the stored value stands.
    let app = TestApp::boot(Arc::clone(&app.env_repo), smtp_env())
        .await
        .unwrap();
    assert!(app.core.env.get_bool(keys::DISABLE_MAGIC_LINK_LOGIN));

    let app = TestApp::boot(
        Arc::clone(&app.env_repo),
        smtp_env().with(keys::DISABLE_MAGIC_LINK_LOGIN, "false"),
    )
    .await
    .unwrap();
    assert!(!app.core.env.get_bool(keys::DISABLE_MAGIC_LINK_LOGIN));
}

#[tokio::test]
async fn test_missing_smtp_forces_email_flags() {
    let repo: Arc<dyn EnvRepository> = Arc::new(MemoryEnvRepository::new());
    TestApp::boot(Arc::clone(&repo), MapEnv::new()).await.unwrap();

    let app = TestApp::boot(
        Arc::clone(&repo),
        MapEnv::new().with(keys::DISABLE_EMAIL_VERIFICATION, "false"),
    )
    .await
    .unwrap();
    assert!(app.core.env.get_bool(keys::DISABLE_EMAIL_VERIFICATION));
    assert!(app.core.env.get_bool(keys::DISABLE_MAGIC_LINK_LOGIN));

    let stored = stored_snapshot(repo.as_ref()).await;
    assert!(stored.flag(keys::DISABLE_EMAIL_VERIFICATION));
    assert!(stored.flag(keys::DISABLE_MAGIC_LINK_LOGIN));
}

#[tokio::test]
async fn test_record_never_contains_encryption_key() {
    let app = TestApp::new().await;
    let key = app.core.env.get_string(keys::ENCRYPTION_KEY);
    assert!(!key.is_empty());

    let stored = stored_snapshot(app.env_repo.as_ref()).await;
    assert_eq!(stored.string(keys::ENCRYPTION_KEY), "");
    assert_eq!(stored.string(keys::SMTP_HOST), "smtp.example.com");

    let record = app.env_repo.find().await.unwrap().unwrap();
    assert_eq!(decode_b64_string(&record.hash).unwrap(), key);
}

#[tokio::test]
async fn test_restart_keeps_key_and_secret() {
    let app = TestApp::new().await;
    let key = app.core.env.get_string(keys::ENCRYPTION_KEY);

    let restarted = TestApp::boot(Arc::clone(&app.env_repo), smtp_env())
        .await
        .unwrap();
    assert_eq!(restarted.core.env.get_string(keys::ENCRYPTION_KEY), key);
    assert_eq!(
        restarted.core.env.get_string(keys::JWT_SECRET),
        "integration-secret"
    );
}

#[tokio::test]
async fn test_tampered_record_fails_boot() {
    let app = TestApp::new().await;

    let mut record = app.env_repo.find().await.unwrap().unwrap();
    let last = record.data.len() - 1;
    record.data[last] ^= 0x01;
    app.env_repo.update(&record).await.unwrap();

    let err = TestApp::boot(Arc::clone(&app.env_repo), smtp_env())
        .await
        .err()
        .unwrap();
    assert_eq!(err.kind, ErrorKind::Crypto);
}

#[tokio::test]
async fn test_failed_write_back_keeps_reconciled_register() {
    let memory = Arc::new(MemoryEnvRepository::new());
    TestApp::boot(memory.clone(), smtp_env()).await.unwrap();

    let env = smtp_env().with(keys::SMTP_HOST, "smtp.internal");
    let store = Arc::new(EnvStore::from_env(EnvSnapshot::defaults(), &env));
    let sync = EnvSync::new(
        Arc::new(ReadOnlyEnvRepository(Arc::clone(&memory))),
        Arc::clone(&store),
        Arc::new(env),
    );

    let err = sync.bootstrap().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Database);
    assert_eq!(store.get_string(keys::SMTP_HOST), "smtp.internal");

    let stored = stored_snapshot(memory.as_ref()).await;
    assert_eq!(stored.string(keys::SMTP_HOST), "smtp.example.com");
}
