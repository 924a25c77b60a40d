//! In-memory session backend using dashmap and moka.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use moka::future::Cache;
use tracing::debug;

use gatekeep_core::config::SessionConfig;
use gatekeep_core::result::AppResult;
use gatekeep_core::traits::session::SessionProvider;

/// Session backend living in process memory.
///
/// User sessions never expire on their own here; they are removed
/// explicitly. Social-login state expires after the configured TTL.
#[derive(Debug, Clone)]
pub struct MemorySessionProvider {
    /// `user_id -> (fingerprint -> refresh_token)`.
    sessions: DashMap<String, HashMap<String, String>>,
    /// OAuth state by key.
    social_states: Cache<String, String>,
}

impl MemorySessionProvider {
    pub fn new(config: &SessionConfig) -> Self {
        let social_states = Cache::builder()
            .max_capacity(config.social_state_capacity)
            .time_to_live(Duration::from_secs(config.social_state_ttl_seconds))
            .build();

        Self {
            sessions: DashMap::new(),
            social_states,
        }
    }
}

#[async_trait]
impl SessionProvider for MemorySessionProvider {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn add_user_session(
        &self,
        user_id: &str,
        fingerprint: &str,
        refresh_token: &str,
    ) -> AppResult<()> {
        self.sessions
            .entry(user_id.to_string())
            .or_default()
            .insert(fingerprint.to_string(), refresh_token.to_string());
        Ok(())
    }

    async fn delete_user_session(&self, user_id: &str, fingerprint: &str) -> AppResult<()> {
        if let Some(mut user) = self.sessions.get_mut(user_id) {
            user.remove(fingerprint);
        }
        self.sessions.remove_if(user_id, |_, user| user.is_empty());
        Ok(())
    }

    async fn delete_all_user_sessions(&self, user_id: &str) -> AppResult<()> {
        self.sessions.remove(user_id);
        Ok(())
    }

    async fn get_user_session(&self, user_id: &str, fingerprint: &str) -> AppResult<String> {
        Ok(self
            .sessions
            .get(user_id)
            .and_then(|user| user.get(fingerprint).cloned())
            .unwrap_or_default())
    }

    async fn get_user_sessions(&self, user_id: &str) -> AppResult<HashMap<String, String>> {
        Ok(self
            .sessions
            .get(user_id)
            .map(|user| user.clone())
            .unwrap_or_default())
    }

    async fn set_social_login_state(&self, key: &str, state: &str) -> AppResult<()> {
        self.social_states
            .insert(key.to_string(), state.to_string())
            .await;
        Ok(())
    }

    async fn get_social_login_state(&self, key: &str) -> AppResult<String> {
        Ok(self.social_states.get(key).await.unwrap_or_default())
    }

    async fn remove_social_login_state(&self, key: &str) -> AppResult<()> {
        self.social_states.invalidate(key).await;
        Ok(())
    }

    async fn clear_store(&self) -> AppResult<()> {
        let users = self.sessions.len();
        self.sessions.clear();
        self.social_states.invalidate_all();
        debug!(users, "Cleared in-memory session store");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
