//! Redis connection management.

use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use gatekeep_core::error::{AppError, ErrorKind};
use gatekeep_core::result::AppResult;

/// Reconnecting Redis connection plus the key prefix of this deployment.
#[derive(Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
    key_prefix: String,
}

impl std::fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisClient")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

impl RedisClient {
    /// Open a connection to `url`.
    pub async fn connect(url: &str, key_prefix: &str) -> AppResult<Self> {
        info!(url = %mask_redis_url(url), "Connecting to Redis");

        let client = Client::open(url).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid REDIS_URL", e)
        })?;

        let conn = ConnectionManager::new(client).await.map_err(|e| {
            AppError::with_source(ErrorKind::Cache, "Failed to connect to Redis", e)
        })?;

        info!("Connected to Redis");
        Ok(Self {
            conn,
            key_prefix: key_prefix.to_string(),
        })
    }

    /// A handle for issuing commands. Clones share one connection.
    pub fn conn_mut(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// `key` with the deployment prefix.
    pub fn prefixed_key(&self, key: &str) -> String {
        prefixed(&self.key_prefix, key)
    }
}

fn prefixed(prefix: &str, key: &str) -> String {
    format!("{prefix}{key}")
}

/// Replace the password in a Redis URL with `****`.
pub fn mask_redis_url(url: &str) -> String {
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    let Some(at) = url[scheme_end..].rfind('@').map(|p| p + scheme_end) else {
        return url.to_string();
    };
    let credentials = &url[scheme_end..at];
    let masked = match credentials.find(':') {
        Some(colon) => format!("{}:****", &credentials[..colon]),
        None => "****".to_string(),
    };
    format!("{}{masked}{}", &url[..scheme_end], &url[at..])
}
