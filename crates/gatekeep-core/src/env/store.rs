//! The process-wide env register.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::info;
use uuid::Uuid;

use crate::crypto::Cipher;
use crate::result::AppResult;

use super::keys;
use super::snapshot::EnvSnapshot;
use super::source::EnvSource;

/// Thread-safe typed configuration register.
///
/// Readers never observe a half-installed snapshot. Per-key setters replace
/// one entry; last writer wins.
#[derive(Debug, Default)]
pub struct EnvStore {
    inner: RwLock<EnvSnapshot>,
}

impl EnvStore {
    /// Create a register holding `snapshot`.
    pub fn new(snapshot: EnvSnapshot) -> Self {
        Self {
            inner: RwLock::new(snapshot),
        }
    }

    /// Seed a register from `defaults` overlaid with every known key found
    /// in `source`.
    ///
    /// A missing `JWT_SECRET` is generated so that tokens can always be
    /// signed.
    pub fn from_env(defaults: EnvSnapshot, source: &dyn EnvSource) -> Self {
        let mut snapshot = defaults;

        for key in keys::STRING_KEYS {
            if let Some(value) = source.string(key) {
                snapshot.set_string(key, value);
            }
        }
        for key in keys::BOOL_KEYS {
            if let Some(value) = source.boolean(key) {
                snapshot.set_flag(key, value);
            }
        }
        for key in keys::LIST_KEYS {
            if let Some(value) = source.list(key) {
                snapshot.set_list(key, value);
            }
        }

        if snapshot.string(keys::JWT_SECRET).is_empty() {
            info!("JWT_SECRET not provided, generating one");
            snapshot.set_string(keys::JWT_SECRET, Uuid::new_v4().to_string());
        }

        Self::new(snapshot)
    }

    fn read(&self) -> RwLockReadGuard<'_, EnvSnapshot> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, EnvSnapshot> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// String value of `key`, `""` when absent.
    pub fn get_string(&self, key: &str) -> String {
        self.read().string(key).to_string()
    }

    /// Boolean value of `key`, `false` when absent.
    pub fn get_bool(&self, key: &str) -> bool {
        self.read().flag(key)
    }

    /// List value of `key`, empty when absent.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.read().list(key).to_vec()
    }

    pub fn set_string(&self, key: &str, value: impl Into<String>) {
        self.write().set_string(key, value);
    }

    pub fn set_bool(&self, key: &str, value: bool) {
        self.write().set_flag(key, value);
    }

    pub fn set_list(&self, key: &str, value: Vec<String>) {
        self.write().set_list(key, value);
    }

    /// Clone of the full register.
    pub fn snapshot(&self) -> EnvSnapshot {
        self.read().clone()
    }

    /// Clone of the register with the encryption key removed.
    pub fn persistable_snapshot(&self) -> EnvSnapshot {
        self.read().without_encryption_key()
    }

    /// Atomically install a whole new snapshot.
    pub fn replace(&self, snapshot: EnvSnapshot) {
        *self.write() = snapshot;
    }

    /// Cipher keyed by the live `ENCRYPTION_KEY`.
    pub fn cipher(&self) -> AppResult<Cipher> {
        Cipher::from_key_str(self.read().string(keys::ENCRYPTION_KEY))
    }
}
