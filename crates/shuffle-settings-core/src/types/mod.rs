//! # Core Type Definitions
//!
//! This module contains the core types shared by the settings cache:
//! - Identifier seams (`Category`, `Variant`)
//! - Derived numeric data (`Odds`)
//! - Error types (`SettingsError`)
//!
//! ## Shape Guarantees
//!
//! - `Odds` always holds exactly `ODDS_LEN` values (fixed-size array)
//! - Identifier sets are closed and known at compile time

use crate::primitives::ODDS_LEN;
use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use thiserror::Error;

// =============================================================================
// IDENTIFIER SEAMS
// =============================================================================

/// A closed, externally enumerated classification that may carry an odds override.
///
/// The canonical name doubles as the config key for the category's raw odds
/// string, so it must be stable and unique within `all()`.
pub trait Category: Copy + Ord + Send + Sync + 'static {
    /// Every member of the enumeration. Order is irrelevant for correctness.
    fn all() -> &'static [Self];

    /// The canonical name of this category.
    fn name(&self) -> &'static str;
}

/// A sub-kind of entity that may carry an alias used to derive setting keys.
///
/// Variants without an alias never have derived numeric settings.
pub trait Variant {
    /// The alias name, or `None` if this variant has none.
    fn alias(&self) -> Option<&str>;
}

// =============================================================================
// ODDS
// =============================================================================

/// Four probability values, one per magnitude bucket (3, 4, 5, 6+).
///
/// Values are parsed percentages divided by 100, so they are conceptually
/// in `[0, 1]`, but nothing clamps them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Odds(pub [f64; ODDS_LEN]);

impl Odds {
    /// The odds used for every category without an override.
    pub const DEFAULT: Self = Self([1.0; ODDS_LEN]);

    /// Create odds from raw values.
    #[must_use]
    pub const fn new(values: [f64; ODDS_LEN]) -> Self {
        Self(values)
    }

    /// Get the value in bucket `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Get the value for a magnitude, clamped into the bucket range.
    #[must_use]
    pub fn at_magnitude(&self, magnitude: i32) -> f64 {
        self.0[crate::odds::odds_index(magnitude)]
    }

    /// Get the raw values.
    #[must_use]
    pub const fn values(&self) -> [f64; ODDS_LEN] {
        self.0
    }
}

impl Default for Odds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the settings layer.
///
/// Lookups never return these; they surface either through logging
/// (malformed odds) or from store-level operations such as `load`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// A token inside an odds string is not an integer percentage.
    #[error("Invalid odds token {token:?} at position {position}: {source}")]
    InvalidOdds {
        /// The offending token, trimmed.
        token: String,
        /// Zero-based bucket position of the token.
        position: usize,
        /// The underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },

    /// A stored value has a shape the store cannot represent.
    #[error("Invalid value for key {key:?}: {reason}")]
    InvalidValue {
        /// The config key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A name did not match any known effect.
    #[error("Unknown effect: {0}")]
    UnknownEffect(String),

    /// A config document could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================
