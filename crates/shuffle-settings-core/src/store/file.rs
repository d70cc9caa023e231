//! # Layered TOML Store
//!
//! A `ConfigStore` backed by a list of flat TOML documents.
//!
//! - Layers are read in order; a key in a later file overrides earlier ones
//! - A missing file is skipped (it simply contributes nothing)
//! - Strings and integers are kept as-is; booleans, floats and datetimes
//!   are kept as their text form; arrays and tables are skipped
//! - A failed load leaves the previously loaded values untouched

use super::{ConfigStore, ConfigValue, ValueMap, lookup_integer, lookup_string};
use crate::SettingsError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A `ConfigStore` that reads layered TOML files.
#[derive(Debug, Clone, Default)]
pub struct FileStore {
    /// Files to read, lowest precedence first.
    load_paths: Vec<PathBuf>,
    /// Merged values from the last successful load.
    values: ValueMap,
}

impl FileStore {
    /// Create a store over `load_paths`. Nothing is read until `load`.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(load_paths: impl IntoIterator<Item = P>) -> Self {
        Self {
            load_paths: load_paths.into_iter().map(Into::into).collect(),
            values: ValueMap::new(),
        }
    }

    /// The configured layers, lowest precedence first.
    #[must_use]
    pub fn load_paths(&self) -> &[PathBuf] {
        &self.load_paths
    }

    /// Replace the configured layers. Takes effect on the next `load`.
    pub fn set_load_paths<P: Into<PathBuf>>(&mut self, load_paths: impl IntoIterator<Item = P>) {
        self.load_paths = load_paths.into_iter().map(Into::into).collect();
    }

    /// Read and merge every layer without touching the current values.
    fn read_layers(&self) -> Result<ValueMap, SettingsError> {
        let mut merged = ValueMap::new();
        for path in &self.load_paths {
            let Some(text) = read_layer(path)? else {
                tracing::debug!(path = %path.display(), "config layer not found; skipping");
                continue;
            };
            let table: toml::Table = toml::from_str(&text)
                .map_err(|e| SettingsError::Parse(format!("{}: {}", path.display(), e)))?;
            for (key, value) in table {
                match convert_value(value) {
                    Some(value) => {
                        merged.insert(key, value);
                    }
                    None => {
                        tracing::warn!(
                            path = %path.display(),
                            key = %key,
                            "config value is an array or table; skipping"
                        );
                    }
                }
            }
        }
        Ok(merged)
    }
}

/// Read one layer. `Ok(None)` means the file does not exist.
fn read_layer(path: &Path) -> Result<Option<String>, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SettingsError::Io(format!(
            "Cannot read '{}': {}",
            path.display(),
            e
        ))),
    }
}

/// Convert a TOML value into a flat config value.
fn convert_value(value: toml::Value) -> Option<ConfigValue> {
    match value {
        toml::Value::String(s) => Some(ConfigValue::Text(s)),
        toml::Value::Integer(i) => Some(ConfigValue::Integer(i)),
        toml::Value::Boolean(b) => Some(ConfigValue::Text(b.to_string())),
        toml::Value::Float(f) => Some(ConfigValue::Text(f.to_string())),
        toml::Value::Datetime(d) => Some(ConfigValue::Text(d.to_string())),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

impl ConfigStore for FileStore {
    fn get_string(&self, key: &str) -> Option<String> {
        lookup_string(&self.values, key)
    }

    fn get_integer(&self, key: &str, default: i32) -> i32 {
        lookup_integer(&self.values, key, default)
    }

    fn load(&mut self) -> Result<bool, SettingsError> {
        let merged = self.read_layers()?;
        if merged == self.values {
            return Ok(false);
        }
        tracing::debug!(
            layers = self.load_paths.len(),
            keys = merged.len(),
            "config values changed"
        );
        self.values = merged;
        Ok(true)
    }

    fn copy_from(&mut self, other: &Self) {
        self.load_paths = other.load_paths.clone();
        self.values = other.values.clone();
    }
}
