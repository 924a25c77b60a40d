//! Session provider trait for pluggable session backends.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for session backends (Redis or in-memory).
///
/// A backend owns two stores: per-user refresh tokens keyed by device
/// fingerprint, and short-lived OAuth social-login state. Absence is never
/// an error; lookups return `""` or an empty map instead.
#[async_trait]
pub trait SessionProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Human-readable backend name for logs.
    fn name(&self) -> &'static str;

    /// Store `refresh_token` for `(user_id, fingerprint)`, replacing any
    /// previous value.
    async fn add_user_session(
        &self,
        user_id: &str,
        fingerprint: &str,
        refresh_token: &str,
    ) -> AppResult<()>;

    /// Remove one device session. No-op if absent.
    async fn delete_user_session(&self, user_id: &str, fingerprint: &str) -> AppResult<()>;

    /// Remove every session of a user.
    async fn delete_all_user_sessions(&self, user_id: &str) -> AppResult<()>;

    /// Refresh token for `(user_id, fingerprint)`, `""` when there is none.
    async fn get_user_session(&self, user_id: &str, fingerprint: &str) -> AppResult<String>;

    /// All sessions of a user as `fingerprint -> refresh_token`.
    async fn get_user_sessions(&self, user_id: &str) -> AppResult<HashMap<String, String>>;

    /// Store an OAuth state value under `key`.
    async fn set_social_login_state(&self, key: &str, state: &str) -> AppResult<()>;

    /// OAuth state for `key`, `""` when unknown or expired.
    async fn get_social_login_state(&self, key: &str) -> AppResult<String>;

    /// Forget an OAuth state value.
    async fn remove_social_login_state(&self, key: &str) -> AppResult<()>;

    /// Remove every session and every social-login state.
    async fn clear_store(&self) -> AppResult<()>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
