//! Redis session backend implementation.
//!
//! Each user's sessions live in one hash (`fingerprint -> refresh_token`);
//! each social-login state is a plain key with an expiry. Every operation
//! is a single atomic command.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use gatekeep_core::config::SessionConfig;
use gatekeep_core::error::{AppError, ErrorKind};
use gatekeep_core::result::AppResult;
use gatekeep_core::traits::session::SessionProvider;

use super::client::RedisClient;
use crate::keys;

/// Redis-backed session provider.
#[derive(Debug, Clone)]
pub struct RedisSessionProvider {
    client: RedisClient,
    /// Expiry refreshed on every session write. Zero disables it.
    session_ttl: Duration,
    social_state_ttl: Duration,
}

impl RedisSessionProvider {
    pub fn new(client: RedisClient, config: &SessionConfig) -> Self {
        Self {
            client,
            session_ttl: Duration::from_secs(config.session_ttl_seconds),
            social_state_ttl: Duration::from_secs(config.social_state_ttl_seconds),
        }
    }

    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
    }

    async fn delete_matching(&self, pattern: &str) -> AppResult<u64> {
        let full_pattern = self.client.prefixed_key(pattern);
        let mut conn = self.client.conn_mut();

        let found: Vec<String> = redis::cmd("KEYS")
            .arg(&full_pattern)
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        for key in &found {
            let _: () = conn.del(key).await.map_err(Self::map_err)?;
        }
        Ok(found.len() as u64)
    }
}

#[async_trait]
impl SessionProvider for RedisSessionProvider {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn add_user_session(
        &self,
        user_id: &str,
        fingerprint: &str,
        refresh_token: &str,
    ) -> AppResult<()> {
        let key = self.client.prefixed_key(&keys::user_sessions(user_id));
        let mut conn = self.client.conn_mut();

        let _: () = conn
            .hset(&key, fingerprint, refresh_token)
            .await
            .map_err(Self::map_err)?;

        if !self.session_ttl.is_zero() {
            let _: () = conn
                .expire(&key, self.session_ttl.as_secs() as i64)
                .await
                .map_err(Self::map_err)?;
        }
        Ok(())
    }

    async fn delete_user_session(&self, user_id: &str, fingerprint: &str) -> AppResult<()> {
        let key = self.client.prefixed_key(&keys::user_sessions(user_id));
        let mut conn = self.client.conn_mut();
        let _: () = conn.hdel(&key, fingerprint).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn delete_all_user_sessions(&self, user_id: &str) -> AppResult<()> {
        let key = self.client.prefixed_key(&keys::user_sessions(user_id));
        let mut conn = self.client.conn_mut();
        let _: () = conn.del(&key).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn get_user_session(&self, user_id: &str, fingerprint: &str) -> AppResult<String> {
        let key = self.client.prefixed_key(&keys::user_sessions(user_id));
        let mut conn = self.client.conn_mut();
        let token: Option<String> = conn.hget(&key, fingerprint).await.map_err(Self::map_err)?;
        Ok(token.unwrap_or_default())
    }

    async fn get_user_sessions(&self, user_id: &str) -> AppResult<HashMap<String, String>> {
        let key = self.client.prefixed_key(&keys::user_sessions(user_id));
        let mut conn = self.client.conn_mut();
        conn.hgetall(&key).await.map_err(Self::map_err)
    }

    async fn set_social_login_state(&self, key: &str, state: &str) -> AppResult<()> {
        let key = self.client.prefixed_key(&keys::social_state(key));
        let mut conn = self.client.conn_mut();
        let _: () = conn
            .set_ex(&key, state, self.social_state_ttl.as_secs())
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn get_social_login_state(&self, key: &str) -> AppResult<String> {
        let key = self.client.prefixed_key(&keys::social_state(key));
        let mut conn = self.client.conn_mut();
        let state: Option<String> = conn.get(&key).await.map_err(Self::map_err)?;
        Ok(state.unwrap_or_default())
    }

    async fn remove_social_login_state(&self, key: &str) -> AppResult<()> {
        let key = self.client.prefixed_key(&keys::social_state(key));
        let mut conn = self.client.conn_mut();
        let _: () = conn.del(&key).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn clear_store(&self) -> AppResult<()> {
        let sessions = self
            .delete_matching(&format!("{}:*", keys::USER_SESSIONS))
            .await?;
        let states = self
            .delete_matching(&format!("{}:*", keys::SOCIAL_STATE))
            .await?;
        debug!(sessions, states, "Cleared Redis session store");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}
