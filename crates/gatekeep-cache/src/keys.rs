//! Key builders for every session store entry.
//!
//! The Redis backend prepends the configured key prefix to these.

/// Namespace for per-user session hashes.
pub const USER_SESSIONS: &str = "user_sessions";

/// Namespace for social-login state values.
pub const SOCIAL_STATE: &str = "social_state";

/// Key of the `fingerprint -> refresh_token` hash of a user.
pub fn user_sessions(user_id: &str) -> String {
    format!("{USER_SESSIONS}:{user_id}")
}

/// Key of one social-login state value.
pub fn social_state(key: &str) -> String {
    format!("{SOCIAL_STATE}:{key}")
}
