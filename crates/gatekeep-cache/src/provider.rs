//! Session store that dispatches to the selected backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use gatekeep_core::config::SessionConfig;
use gatekeep_core::env::{EnvStore, keys};
use gatekeep_core::error::AppError;
use gatekeep_core::result::AppResult;
use gatekeep_core::traits::session::SessionProvider;

/// Session store wrapping exactly one backend.
///
/// The backend is chosen once at construction and never changes, so every
/// read sees every write made through this store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<dyn SessionProvider>,
}

impl SessionStore {
    /// Build the store selected by `REDIS_URL` in the env register.
    ///
    /// A non-empty `REDIS_URL` selects Redis, and failing to reach it is an
    /// error rather than a silent switch to memory.
    pub async fn new(env: &EnvStore, config: &SessionConfig) -> AppResult<Self> {
        config.validate()?;

        let redis_url = env.get_string(keys::REDIS_URL);
        let inner = if redis_url.trim().is_empty() {
            Self::memory(config)?
        } else {
            Self::redis(redis_url.trim(), config).await?
        };

        info!(backend = inner.name(), "Session store initialized");
        Ok(Self { inner })
    }

    #[cfg(feature = "memory")]
    fn memory(config: &SessionConfig) -> AppResult<Arc<dyn SessionProvider>> {
        Ok(Arc::new(crate::memory::MemorySessionProvider::new(config)))
    }

    #[cfg(not(feature = "memory"))]
    fn memory(_config: &SessionConfig) -> AppResult<Arc<dyn SessionProvider>> {
        Err(AppError::configuration(
            "REDIS_URL is empty and the in-memory session backend is not compiled in",
        ))
    }

    #[cfg(feature = "redis-backend")]
    async fn redis(url: &str, config: &SessionConfig) -> AppResult<Arc<dyn SessionProvider>> {
        let client = crate::redis::RedisClient::connect(url, &config.key_prefix).await?;
        let provider = crate::redis::RedisSessionProvider::new(client, config);

        match provider.health_check().await {
            Ok(true) => Ok(Arc::new(provider)),
            Ok(false) => Err(AppError::cache("Redis did not answer PING")),
            Err(e) => {
                error!(error = %e, "Redis unreachable at startup");
                Err(e)
            }
        }
    }

    #[cfg(not(feature = "redis-backend"))]
    async fn redis(_url: &str, _config: &SessionConfig) -> AppResult<Arc<dyn SessionProvider>> {
        Err(AppError::configuration(
            "REDIS_URL is set but the Redis session backend is not compiled in",
        ))
    }

    /// Wrap an existing backend.
    pub fn from_provider(provider: Arc<dyn SessionProvider>) -> Self {
        Self { inner: provider }
    }

    /// Name of the active backend.
    pub fn backend(&self) -> &'static str {
        self.inner.name()
    }
}

#[async_trait]
impl SessionProvider for SessionStore {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn add_user_session(
        &self,
        user_id: &str,
        fingerprint: &str,
        refresh_token: &str,
    ) -> AppResult<()> {
        self.inner
            .add_user_session(user_id, fingerprint, refresh_token)
            .await
    }

    async fn delete_user_session(&self, user_id: &str, fingerprint: &str) -> AppResult<()> {
        self.inner.delete_user_session(user_id, fingerprint).await
    }

    async fn delete_all_user_sessions(&self, user_id: &str) -> AppResult<()> {
        self.inner.delete_all_user_sessions(user_id).await
    }

    async fn get_user_session(&self, user_id: &str, fingerprint: &str) -> AppResult<String> {
        self.inner.get_user_session(user_id, fingerprint).await
    }

    async fn get_user_sessions(&self, user_id: &str) -> AppResult<HashMap<String, String>> {
        self.inner.get_user_sessions(user_id).await
    }

    async fn set_social_login_state(&self, key: &str, state: &str) -> AppResult<()> {
        self.inner.set_social_login_state(key, state).await
    }

    async fn get_social_login_state(&self, key: &str) -> AppResult<String> {
        self.inner.get_social_login_state(key).await
    }

    async fn remove_social_login_state(&self, key: &str) -> AppResult<()> {
        self.inner.remove_social_login_state(key).await
    }

    async fn clear_store(&self) -> AppResult<()> {
        self.inner.clear_store().await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use super::*;

    async fn memory_store() -> SessionStore {
        SessionStore::new(&EnvStore::default(), &SessionConfig::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_redis_url_selects_memory() {
        let store = memory_store().await;
        assert_eq!(store.backend(), "memory");
        assert!(store.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let store = memory_store().await;
        store.add_user_session("u1", "fp1", "rt1").await.unwrap();
        store.add_user_session("u1", "fp1", "rt1").await.unwrap();

        let sessions = store.get_user_sessions("u1").await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions["fp1"], "rt1");
    }

    #[tokio::test]
    async fn test_add_replaces_token_for_same_fingerprint() {
        let store = memory_store().await;
        store.add_user_session("u1", "fp1", "old").await.unwrap();
        store.add_user_session("u1", "fp1", "new").await.unwrap();
        assert_eq!(store.get_user_session("u1", "fp1").await.unwrap(), "new");
    }

    #[tokio::test]
    async fn test_fingerprints_are_isolated() {
        let store = memory_store().await;
        store.add_user_session("u1", "laptop", "rt-a").await.unwrap();
        store.add_user_session("u1", "phone", "rt-b").await.unwrap();

        store.delete_user_session("u1", "laptop").await.unwrap();
        assert_eq!(store.get_user_session("u1", "laptop").await.unwrap(), "");
        assert_eq!(store.get_user_session("u1", "phone").await.unwrap(), "rt-b");
    }

    #[tokio::test]
    async fn test_delete_all_invalidates_every_device() {
        let store = memory_store().await;
        for fp in ["a", "b", "c"] {
            store.add_user_session("u1", fp, "rt").await.unwrap();
        }
        store.add_user_session("u2", "a", "other").await.unwrap();

        store.delete_all_user_sessions("u1").await.unwrap();
        assert!(store.get_user_sessions("u1").await.unwrap().is_empty());
        for fp in ["a", "b", "c"] {
            assert_eq!(store.get_user_session("u1", fp).await.unwrap(), "");
        }
        assert_eq!(store.get_user_session("u2", "a").await.unwrap(), "other");
    }

    #[tokio::test]
    async fn test_zero_social_state_ttl_is_refused() {
        let config = SessionConfig {
            social_state_ttl_seconds: 0,
            ..SessionConfig::default()
        };
        let err = SessionStore::new(&EnvStore::default(), &config)
            .await
            .unwrap_err();
        assert_eq!(err.kind, gatekeep_core::error::ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_unreachable_redis_is_fatal() {
        let env = EnvStore::default();
        env.set_string(keys::REDIS_URL, "not-a-redis-url");
        let err = SessionStore::new(&env, &SessionConfig::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, gatekeep_core::error::ErrorKind::Configuration);
    }
}
