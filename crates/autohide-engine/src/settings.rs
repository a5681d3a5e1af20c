//! Settings
//!
//! Configuration store interface and the gate that resolves the
//! auto-hide flag from it. Any failure reads as "disabled".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Key holding the auto-hide enable flag
pub const AUTO_HIDE_KEY: &str = "auto_hide.enabled";

/// Configuration value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl SettingValue {
    /// Interpret as a boolean flag, if it is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Configuration store errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration store unreachable")]
    Unreachable,
    #[error("configuration store corrupt: {0}")]
    Corrupt(String),
}

/// Configuration store
///
/// The store lives outside the engine; reads may fail and keys may be
/// absent. Change notifications are delivered by the embedder as
/// [`ConfigChange`] values.
pub trait ConfigStore {
    fn get(&self, key: &str) -> Result<Option<SettingValue>, ConfigError>;
}

/// A configuration change notification
#[derive(Debug, Clone)]
pub struct ConfigChange {
    pub key: String,
    pub old: Option<SettingValue>,
    pub new: Option<SettingValue>,
}

/// In-memory store for tests and the host simulator
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, SettingValue>,
    /// When set, every read fails (simulates an unreachable store)
    pub fail_reads: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, returning the change notification to deliver
    pub fn set(&mut self, key: &str, value: SettingValue) -> ConfigChange {
        let old = self.values.insert(key.to_string(), value.clone());
        ConfigChange {
            key: key.to_string(),
            old,
            new: Some(value),
        }
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<SettingValue>, ConfigError> {
        if self.fail_reads {
            return Err(ConfigError::Unreachable);
        }
        Ok(self.values.get(key).cloned())
    }
}

/// Resolves the auto-hide flag and filters change notifications
pub struct SettingsGate {
    key: String,
}

impl SettingsGate {
    pub fn new() -> Self {
        Self { key: AUTO_HIDE_KEY.to_string() }
    }

    /// Read the current flag; unreadable store or absent/ill-typed key
    /// resolves to disabled
    pub fn read(&self, store: &dyn ConfigStore) -> bool {
        match store.get(&self.key) {
            Ok(Some(value)) => value.as_bool().unwrap_or_else(|| {
                warn!(key = %self.key, "setting is not a boolean, treating as disabled");
                false
            }),
            Ok(None) => false,
            Err(err) => {
                warn!(key = %self.key, %err, "settings read failed, treating as disabled");
                false
            }
        }
    }

    /// The new effective flag if this change is for our key, `None`
    /// for unrelated keys
    pub fn relevant(&self, change: &ConfigChange) -> Option<bool> {
        if change.key != self.key {
            return None;
        }
        let enabled = change.new.as_ref().and_then(SettingValue::as_bool).unwrap_or(false);
        debug!(enabled, "auto-hide flag changed");
        Some(enabled)
    }
}

impl Default for SettingsGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_defaults_to_disabled() {
        let gate = SettingsGate::new();
        let store = MemoryStore::new();
        assert!(!gate.read(&store));
    }

    #[test]
    fn test_read_failure_is_disabled() {
        let gate = SettingsGate::new();
        let mut store = MemoryStore::new();
        store.set(AUTO_HIDE_KEY, SettingValue::Bool(true));
        store.fail_reads = true;
        assert!(!gate.read(&store));
    }

    #[test]
    fn test_ill_typed_value_is_disabled() {
        let gate = SettingsGate::new();
        let mut store = MemoryStore::new();
        store.set(AUTO_HIDE_KEY, SettingValue::Str("yes".into()));
        assert!(!gate.read(&store));
    }

    #[test]
    fn test_read_enabled() {
        let gate = SettingsGate::new();
        let mut store = MemoryStore::new();
        store.set(AUTO_HIDE_KEY, SettingValue::Bool(true));
        assert!(gate.read(&store));
    }

    #[test]
    fn test_unrelated_change_ignored() {
        let gate = SettingsGate::new();
        let mut store = MemoryStore::new();
        let change = store.set("theme.dark", SettingValue::Bool(true));
        assert_eq!(gate.relevant(&change), None);
    }

    #[test]
    fn test_own_change_yields_flag() {
        let gate = SettingsGate::new();
        let mut store = MemoryStore::new();
        let on = store.set(AUTO_HIDE_KEY, SettingValue::Bool(true));
        assert_eq!(gate.relevant(&on), Some(true));
        let off = store.set(AUTO_HIDE_KEY, SettingValue::Bool(false));
        assert_eq!(gate.relevant(&off), Some(false));
    }
}
