//! The complete register contents at one point in time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};
use crate::result::AppResult;

use super::keys;

/// Typed configuration entries, grouped by value kind.
///
/// This is also the JSON document that gets encrypted into the persisted
/// env record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvSnapshot {
    /// String-valued entries.
    #[serde(default)]
    pub string_env: BTreeMap<String, String>,
    /// Boolean-valued entries.
    #[serde(default)]
    pub bool_env: BTreeMap<String, bool>,
    /// List-valued entries.
    #[serde(default)]
    pub slice_env: BTreeMap<String, Vec<String>>,
}

impl EnvSnapshot {
    /// Built-in defaults applied before the process environment is read.
    pub fn defaults() -> Self {
        let mut snapshot = Self::default();

        for key in keys::STRING_KEYS {
            snapshot.string_env.insert((*key).to_string(), String::new());
        }
        for key in keys::BOOL_KEYS {
            snapshot.bool_env.insert((*key).to_string(), false);
        }
        for key in keys::LIST_KEYS {
            snapshot.slice_env.insert((*key).to_string(), Vec::new());
        }

        snapshot.set_string(keys::ENV, "production");
        snapshot.set_string(keys::PORT, "8080");
        snapshot.set_string(keys::JWT_TYPE, "HS256");
        snapshot.set_string(keys::JWT_ROLE_CLAIM, "role");
        snapshot.set_string(keys::COOKIE_NAME, "gatekeep");
        snapshot.set_list(keys::ALLOWED_ORIGINS, vec!["*".to_string()]);
        snapshot.set_list(keys::ROLES, vec!["user".to_string()]);
        snapshot.set_list(keys::DEFAULT_ROLES, vec!["user".to_string()]);

        snapshot
    }

    /// String value, `""` when absent.
    pub fn string(&self, key: &str) -> &str {
        self.string_env.get(key).map(String::as_str).unwrap_or("")
    }

    /// Boolean value, `false` when absent.
    pub fn flag(&self, key: &str) -> bool {
        self.bool_env.get(key).copied().unwrap_or(false)
    }

    /// List value, empty when absent.
    pub fn list(&self, key: &str) -> &[String] {
        self.slice_env.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace one string entry.
    pub fn set_string(&mut self, key: &str, value: impl Into<String>) {
        self.string_env.insert(key.to_string(), value.into());
    }

    /// Replace one boolean entry.
    pub fn set_flag(&mut self, key: &str, value: bool) {
        self.bool_env.insert(key.to_string(), value);
    }

    /// Replace one list entry.
    pub fn set_list(&mut self, key: &str, value: Vec<String>) {
        self.slice_env.insert(key.to_string(), value);
    }

    /// Copy of this snapshot with the encryption key stripped, suitable for
    /// encrypting into the persisted record.
    pub fn without_encryption_key(&self) -> Self {
        let mut copy = self.clone();
        copy.string_env.remove(keys::ENCRYPTION_KEY);
        copy
    }

    /// Serialize to the JSON plaintext that gets encrypted.
    pub fn to_json(&self) -> AppResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parse the decrypted JSON plaintext of a persisted record.
    pub fn from_json(bytes: &[u8]) -> AppResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            AppError::with_source(ErrorKind::Decode, format!("Malformed env snapshot: {e}"), e)
        })
    }
}
