//! Where process environment values come from.

use std::collections::HashMap;

/// Read-only view of environment variables.
///
/// The typed helpers return `None` for unset or blank values so callers only
/// ever see values that are meant to override something.
pub trait EnvSource: Send + Sync {
    /// Raw value of `key`, if set.
    fn var(&self, key: &str) -> Option<String>;

    /// Trimmed, non-blank value of `key`.
    fn string(&self, key: &str) -> Option<String> {
        self.var(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Boolean value of `key`. Unparsable values read as `None`.
    fn boolean(&self, key: &str) -> Option<bool> {
        self.string(key).and_then(|v| parse_bool(&v))
    }

    /// Comma-separated list value of `key`, in declaration order.
    fn list(&self, key: &str) -> Option<Vec<String>> {
        self.string(key).map(|v| split_list(&v))
    }
}

/// Reads `std::env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed set of variables.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Boolean spellings accepted from the environment.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Split a list value on `,`. Elements are kept verbatim.
pub fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}
