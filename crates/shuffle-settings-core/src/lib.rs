//! # shuffle-settings-core
//!
//! The derived settings cache for shuffle-settings - THE LOGIC.
//!
//! This crate sits on top of a generic key-value config store and exposes
//! typed accessors for per-effect activation odds and per-species mega
//! settings.
//!
//! ## Data Flow
//!
//! ```text
//! ConfigStore::load ──changed?──▶ EffectSettings::rebuild ──▶ OddsTable
//!                                                              │
//!        EffectSettings::odds ◀────────────────────────────────┘
//!        EffectSettings::speedup_cap / threshold ◀── ConfigStore (uncached)
//! ```
//!
//! ## Architectural Constraints
//!
//! - Every lookup is total: malformed or missing config degrades to defaults
//! - Malformed odds are reported through `tracing`, never returned to callers
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod keys;
pub mod odds;
pub mod primitives;
pub mod settings;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Category, Odds, SettingsError, Variant};

// =============================================================================
// RE-EXPORTS: Settings Cache
// =============================================================================

pub use catalog::{Effect, Species};
pub use keys::{speedup_cap_key, threshold_key, variant_speedup_cap_key, variant_threshold_key};
pub use odds::{ParsedOdds, odds_index, parse_odds};
pub use settings::{EffectSettings, OddsTable};

// =============================================================================
// RE-EXPORTS: Stores (from store module)
// =============================================================================

pub use store::{ConfigStore, ConfigValue, FileStore, MemoryStore, ValueMap};
