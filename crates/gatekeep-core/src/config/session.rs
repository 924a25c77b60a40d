//! Session backend configuration.
//!
//! Which backend is used is not decided here: the presence of `REDIS_URL`
//! in the runtime env register selects Redis, its absence selects the
//! in-process store. These settings tune whichever backend is active.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Session store tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Prefix applied to every Redis key written by the session store.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Redis-side expiry of a user's session hash in seconds. `0` disables it.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: u64,
    /// Lifetime of an OAuth social-login state entry in seconds.
    #[serde(default = "default_social_state_ttl")]
    pub social_state_ttl_seconds: u64,
    /// Maximum number of social-login states held by the in-memory backend.
    #[serde(default = "default_social_state_capacity")]
    pub social_state_capacity: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
            session_ttl_seconds: default_session_ttl(),
            social_state_ttl_seconds: default_social_state_ttl(),
            social_state_capacity: default_social_state_capacity(),
        }
    }
}

impl SessionConfig {
    /// Reject settings no backend can honour.
    pub fn validate(&self) -> AppResult<()> {
        if self.social_state_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "session.social_state_ttl_seconds must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn default_key_prefix() -> String {
    "gatekeep:".to_string()
}

fn default_session_ttl() -> u64 {
    // 30 days
    2_592_000
}

fn default_social_state_ttl() -> u64 {
    600
}

fn default_social_state_capacity() -> u64 {
    10_000
}
