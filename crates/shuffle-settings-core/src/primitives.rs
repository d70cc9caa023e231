//! # Settings Primitives
//!
//! Hardcoded constants for the settings layer.
//!
//! These are compiled into the binary and are immutable at runtime.

/// Number of magnitude buckets in an odds entry.
pub const ODDS_LEN: usize = 4;

/// Smallest magnitude with its own bucket. Anything below collapses into it.
pub const MIN_MAGNITUDE: i32 = 3;

/// Largest magnitude with its own bucket. Anything above collapses into it.
pub const MAX_MAGNITUDE: i32 = 6;

/// Divisor turning a parsed percentage into a probability.
pub const PERCENT_SCALE: f64 = 100.0;

/// Key prefix for the per-alias mega speedup cap.
///
/// The full key is `MEGA_SPEEDUPS_<alias>`.
pub const SPEEDUP_CAP_KEY_PREFIX: &str = "MEGA_SPEEDUPS_";

/// Key prefix for the per-alias mega threshold.
///
/// The full key is `MEGA_THRESHOLD_<alias>`.
pub const THRESHOLD_KEY_PREFIX: &str = "MEGA_THRESHOLD_";

/// Speedup cap returned when no value is configured.
pub const DEFAULT_SPEEDUP_CAP: i32 = 0;

/// Threshold returned when no value is configured.
pub const DEFAULT_THRESHOLD: i32 = i32::MAX;
