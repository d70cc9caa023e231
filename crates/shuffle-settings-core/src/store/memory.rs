//! In-memory store backend.
//!
//! Writes are staged and only become visible on `load`, so the store
//! behaves like a config file that was edited and then reloaded.

use super::{ConfigStore, ConfigValue, ValueMap, lookup_integer, lookup_string};
use crate::SettingsError;

/// An in-memory `ConfigStore`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Values visible to lookups.
    committed: ValueMap,
    /// Values that the next `load` will commit.
    staged: ValueMap,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose values are already committed.
    #[must_use]
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<ConfigValue>,
    {
        let committed: ValueMap = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            staged: committed.clone(),
            committed,
        }
    }

    /// Stage a string value.
    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.staged.insert(key.into(), ConfigValue::Text(value.into()));
    }

    /// Stage an integer value.
    pub fn set_integer(&mut self, key: impl Into<String>, value: i32) {
        self.staged.insert(key.into(), ConfigValue::from(value));
    }

    /// Stage removal of a key.
    pub fn remove(&mut self, key: &str) {
        self.staged.remove(key);
    }

    /// Whether staged edits differ from what lookups currently see.
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        self.staged != self.committed
    }
}

impl ConfigStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        lookup_string(&self.committed, key)
    }

    fn get_integer(&self, key: &str, default: i32) -> i32 {
        lookup_integer(&self.committed, key, default)
    }

    fn load(&mut self) -> Result<bool, SettingsError> {
        if !self.has_pending_changes() {
            return Ok(false);
        }
        self.committed = self.staged.clone();
        Ok(true)
    }

    fn copy_from(&mut self, other: &Self) {
        self.committed = other.committed.clone();
        self.staged = other.staged.clone();
    }
}
