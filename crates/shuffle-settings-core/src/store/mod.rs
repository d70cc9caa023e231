//! # Key-Value Store
//!
//! The seam between the settings cache and wherever raw config values live.
//!
//! ## Backends
//!
//! - `MemoryStore`: staged in-memory values, committed on `load`
//! - `FileStore`: layered flat TOML files, re-read on `load`

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::SettingsError;
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// CONFIGSTORE TRAIT
// =============================================================================

/// The ConfigStore trait defines what the settings cache consumes.
///
/// Lookups are infallible: a missing or mistyped value is reported as
/// absent (or as the supplied default). Only `load` touches the outside
/// world and may fail.
pub trait ConfigStore: Clone + Send + Sync {
    /// Get the raw string at `key`.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Get the integer at `key`, or `default` if absent or not an integer.
    fn get_integer(&self, key: &str, default: i32) -> i32;

    /// Refresh values from the backing source.
    ///
    /// Returns `true` iff any visible value changed.
    fn load(&mut self) -> Result<bool, SettingsError>;

    /// Replace this store's data (and backing source) with `other`'s.
    fn copy_from(&mut self, other: &Self);
}

// =============================================================================
// VALUES
// =============================================================================

/// A single raw config value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    /// An integer value.
    Integer(i64),
    /// A textual value.
    Text(String),
}

impl ConfigValue {
    /// The value as text. Integers are rendered in decimal.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Integer(i) => i.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// The value as an `i32`, if it is (or spells) one in range.
    #[must_use]
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(i) => i32::try_from(*i).ok(),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{}", i),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for ConfigValue {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

/// Key-ordered value map shared by the store backends.
pub type ValueMap = BTreeMap<String, ConfigValue>;

/// Look up a string in a value map.
pub(crate) fn lookup_string(values: &ValueMap, key: &str) -> Option<String> {
    values.get(key).map(ConfigValue::as_text)
}

/// Look up an integer in a value map, falling back to `default`.
pub(crate) fn lookup_integer(values: &ValueMap, key: &str, default: i32) -> i32 {
    match values.get(key) {
        None => default,
        Some(value) => value.as_integer().unwrap_or_else(|| {
            tracing::warn!(key, value = %value, "config value is not an i32; using default");
            default
        }),
    }
}
