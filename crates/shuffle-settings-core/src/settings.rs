//! # Effect Settings
//!
//! The derived settings cache: an odds table projected from a `ConfigStore`.
//!
//! ## Consistency
//!
//! - The odds table is rebuilt wholesale (cleared, then refilled for every
//!   category) after a reload that changed the store, and after `copy_from`
//! - Rebuilds and single-category refreshes run under the table's write
//!   lock, so readers see either the old table or the new one, never a mix
//! - Lock order is always table, then store
//!
//! ## Uncached Lookups
//!
//! Speedup caps and thresholds are read straight from the store on every
//! call; only odds are cached.

use crate::keys::{variant_speedup_cap_key, variant_threshold_key};
use crate::odds::{odds_index, parse_odds};
use crate::primitives::{DEFAULT_SPEEDUP_CAP, DEFAULT_THRESHOLD};
use crate::store::ConfigStore;
use crate::{Category, Odds, SettingsError, Variant};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Cached odds, keyed by category. Absence means `Odds::DEFAULT`.
pub type OddsTable<C> = BTreeMap<C, Odds>;

/// Typed settings for categories `C`, derived from store `S`.
///
/// All operations take `&self`; share it behind an `Arc` across threads.
#[derive(Debug)]
pub struct EffectSettings<C: Category, S: ConfigStore> {
    /// The derived odds table.
    odds: RwLock<OddsTable<C>>,
    /// The backing key-value store.
    store: RwLock<S>,
}

impl<C: Category, S: ConfigStore> EffectSettings<C, S> {
    /// Wrap `store` and build the odds table from its current values.
    #[must_use]
    pub fn new(store: S) -> Self {
        let settings = Self {
            odds: RwLock::new(OddsTable::new()),
            store: RwLock::new(store),
        };
        settings.rebuild();
        settings
    }

    /// Create settings over a copy of `other`'s store.
    ///
    /// The odds table is rebuilt from the copied data, never copied.
    #[must_use]
    pub fn from_settings(other: &Self) -> Self {
        Self::new(other.store.read().clone())
    }

    // =========================================================================
    // RELOAD / REBUILD
    // =========================================================================

    /// Reload the store and rebuild the odds table iff anything changed.
    ///
    /// Returns whether the store reported a change. A store error leaves
    /// both the store values and the table as they were.
    pub fn reload(&self) -> Result<bool, SettingsError> {
        let changed = self.store.write().load()?;
        if changed {
            tracing::info!("config changed; rebuilding odds table");
            self.rebuild();
        } else {
            tracing::debug!("config unchanged; keeping odds table");
        }
        Ok(changed)
    }

    /// Replace this instance's store data with `other`'s and rebuild.
    ///
    /// The rebuild happens unconditionally, even if the data is identical.
    pub fn copy_from(&self, other: &Self) {
        // Snapshot first so the two instances' store locks are never held together.
        let snapshot = other.store.read().clone();

        let mut table = self.odds.write();
        let mut store = self.store.write();
        store.copy_from(&snapshot);
        rebuild_table(&mut *table, &*store);
    }

    /// Clear the odds table and re-derive every category.
    pub fn rebuild(&self) {
        let mut table = self.odds.write();
        let store = self.store.read();
        rebuild_table(&mut *table, &*store);
    }

    /// Re-derive the odds entry for one category from its current raw value.
    pub fn refresh_category(&self, category: C) {
        let mut table = self.odds.write();
        let store = self.store.read();
        refresh_entry(&mut *table, &*store, category);
    }

    // =========================================================================
    // LOOKUPS
    // =========================================================================

    /// The odds for `category` at `magnitude` (clamped into 3..=6).
    ///
    /// Categories without an override use `Odds::DEFAULT`.
    #[must_use]
    pub fn odds(&self, category: C, magnitude: i32) -> f64 {
        let index = odds_index(magnitude);
        match self.odds.read().get(&category) {
            Some(odds) => odds.0[index],
            None => Odds::DEFAULT.0[index],
        }
    }

    /// A copy of the cached odds for `category`, or `None` if it has no override.
    #[must_use]
    pub fn odds_entry(&self, category: C) -> Option<Odds> {
        self.odds.read().get(&category).copied()
    }

    /// A copy of the whole odds table, taken under a single read lock.
    #[must_use]
    pub fn snapshot(&self) -> OddsTable<C> {
        self.odds.read().clone()
    }

    /// Categories that currently have an odds override, in order.
    #[must_use]
    pub fn configured_categories(&self) -> Vec<C> {
        self.odds.read().keys().copied().collect()
    }

    /// Every category whose raw odds string has a malformed token.
    ///
    /// Reads the store directly; the table is not touched.
    #[must_use]
    pub fn odds_errors(&self) -> Vec<(C, SettingsError)> {
        let store = self.store.read();
        C::all()
            .iter()
            .filter_map(|&category| {
                let raw = store.get_string(category.name())?;
                parse_odds(&raw).error.map(|e| (category, e))
            })
            .collect()
    }

    /// The mega speedup cap for `variant`.
    ///
    /// Zero if the variant has no alias or no value is configured.
    #[must_use]
    pub fn speedup_cap<V: Variant + ?Sized>(&self, variant: &V) -> i32 {
        variant_speedup_cap_key(variant).map_or(DEFAULT_SPEEDUP_CAP, |key| {
            self.store.read().get_integer(&key, DEFAULT_SPEEDUP_CAP)
        })
    }

    /// The mega threshold for `variant`.
    ///
    /// `i32::MAX` if the variant has no alias or no value is configured.
    #[must_use]
    pub fn threshold<V: Variant + ?Sized>(&self, variant: &V) -> i32 {
        variant_threshold_key(variant).map_or(DEFAULT_THRESHOLD, |key| {
            self.store.read().get_integer(&key, DEFAULT_THRESHOLD)
        })
    }

    /// The speedup cap key for `variant`, or `None` if it has no alias.
    #[must_use]
    pub fn speedup_cap_key<V: Variant + ?Sized>(&self, variant: &V) -> Option<String> {
        variant_speedup_cap_key(variant)
    }

    /// The threshold key for `variant`, or `None` if it has no alias.
    #[must_use]
    pub fn threshold_key<V: Variant + ?Sized>(&self, variant: &V) -> Option<String> {
        variant_threshold_key(variant)
    }

    /// Run `f` against the backing store.
    pub fn with_store<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.store.read())
    }

    /// Run `f` against the backing store mutably.
    ///
    /// The odds table is not rebuilt; call `reload` or `rebuild` afterwards.
    pub fn with_store_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.store.write())
    }
}

// =============================================================================
// TABLE DERIVATION
// =============================================================================

/// Clear `table` and refill it for every category.
fn rebuild_table<C: Category, S: ConfigStore>(table: &mut OddsTable<C>, store: &S) {
    table.clear();
    for &category in C::all() {
        refresh_entry(table, store, category);
    }
    tracing::debug!(entries = table.len(), "odds table rebuilt");
}

/// Re-derive one category's entry.
fn refresh_entry<C: Category, S: ConfigStore>(table: &mut OddsTable<C>, store: &S, category: C) {
    let raw = match store.get_string(category.name()) {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            table.remove(&category);
            return;
        }
    };

    let parsed = parse_odds(&raw);
    if let Some(err) = &parsed.error {
        tracing::warn!(
            category = category.name(),
            raw = %raw,
            error = %err,
            "malformed odds entry; remaining buckets use defaults"
        );
    }
    table.insert(category, parsed.odds);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Effect, Species};
    use crate::store::MemoryStore;

    fn settings_with(values: &[(&str, &str)]) -> EffectSettings<Effect, MemoryStore> {
        EffectSettings::new(MemoryStore::with_values(values.iter().copied()))
    }

    #[test]
    fn new_builds_table_immediately() {
        let settings = settings_with(&[("BURN", "50 100 100 100")]);
        assert_eq!(settings.odds(Effect::Burn, 3), 0.5);
        assert_eq!(settings.odds(Effect::Burn, 4), 1.0);
    }

    #[test]
    fn unconfigured_category_uses_default() {
        let settings = settings_with(&[]);
        for m in -2..10 {
            assert_eq!(settings.odds(Effect::Freeze, m), 1.0);
        }
        assert_eq!(settings.odds_entry(Effect::Freeze), None);
    }

    #[test]
    fn empty_raw_value_has_no_entry() {
        let settings = settings_with(&[("FREEZE", "")]);
        assert_eq!(settings.odds_entry(Effect::Freeze), None);
    }

    #[test]
    fn whitespace_raw_value_has_default_entry() {
        let settings = settings_with(&[("FREEZE", " ")]);
        assert_eq!(settings.odds_entry(Effect::Freeze), Some(Odds::DEFAULT));
    }

    #[test]
    fn reload_rebuilds_only_on_change() {
        let settings = settings_with(&[("BURN", "10")]);
        assert!(!settings.reload().expect("reload"));

        settings.with_store_mut(|s| s.set_string("BURN", "20"));
        assert_eq!(settings.odds(Effect::Burn, 3), 0.1);

        assert!(settings.reload().expect("reload"));
        assert_eq!(settings.odds(Effect::Burn, 3), 0.2);
    }

    #[test]
    fn unchanged_reload_keeps_manual_refresh_state() {
        let settings = settings_with(&[("BURN", "10")]);

        // A committed change the table has not seen yet.
        settings.with_store_mut(|s| {
            s.set_string("BURN", "30");
            s.load().expect("load");
        });
        assert!(!settings.reload().expect("reload"));
        assert_eq!(settings.odds(Effect::Burn, 3), 0.1);

        settings.refresh_category(Effect::Burn);
        assert_eq!(settings.odds(Effect::Burn, 3), 0.3);
    }

    #[test]
    fn refresh_removes_cleared_entry() {
        let settings = settings_with(&[("POISON", "40 40 40 40")]);
        settings.with_store_mut(|s| {
            s.remove("POISON");
            s.load().expect("load");
        });
        settings.refresh_category(Effect::Poison);
        assert_eq!(settings.odds_entry(Effect::Poison), None);
    }

    #[test]
    fn copy_from_rebuilds_from_other_store() {
        let a = settings_with(&[("BURN", "10"), ("FREEZE", "20")]);
        let b = settings_with(&[("FREEZE", "70 70 70 70")]);

        a.copy_from(&b);

        assert_eq!(a.odds_entry(Effect::Burn), None);
        assert_eq!(a.odds_entry(Effect::Freeze), b.odds_entry(Effect::Freeze));
        assert_eq!(a.configured_categories(), vec![Effect::Freeze]);
    }

    #[test]
    fn copy_from_self_rebuilds() {
        let settings = settings_with(&[("BURN", "10")]);
        settings.with_store_mut(|s| {
            s.set_string("BURN", "60");
            s.load().expect("load");
        });
        settings.copy_from(&settings);
        assert_eq!(settings.odds(Effect::Burn, 3), 0.6);
    }

    #[test]
    fn from_settings_does_not_share_state() {
        let a = settings_with(&[("BURN", "10")]);
        let b = EffectSettings::from_settings(&a);

        a.with_store_mut(|s| s.set_string("BURN", "90"));
        a.reload().expect("reload");

        assert_eq!(a.odds(Effect::Burn, 3), 0.9);
        assert_eq!(b.odds(Effect::Burn, 3), 0.1);
    }

    #[test]
    fn odds_errors_lists_malformed_entries() {
        let settings = settings_with(&[("BURN", "80 bad 90 70"), ("FREEZE", "10 20")]);
        let errors = settings.odds_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, Effect::Burn);
        assert_eq!(
            settings.odds_entry(Effect::Burn).map(|o| o.values()),
            Some([0.8, 1.0, 1.0, 1.0])
        );
    }

    #[test]
    fn mega_values_read_through() {
        let settings = settings_with(&[
            ("MEGA_SPEEDUPS_Mega Gengar", "3"),
            ("MEGA_THRESHOLD_Mega Gengar", "12"),
        ]);
        let gengar = Species::with_mega("Gengar", "Mega Gengar");
        assert_eq!(settings.speedup_cap(&gengar), 3);
        assert_eq!(settings.threshold(&gengar), 12);

        settings.with_store_mut(|s| {
            s.set_integer("MEGA_SPEEDUPS_Mega Gengar", 5);
            s.load().expect("load");
        });
        assert_eq!(settings.speedup_cap(&gengar), 5);
    }

    #[test]
    fn mega_values_default_when_unset() {
        let settings = settings_with(&[]);
        let venusaur = Species::with_mega("Venusaur", "Mega Venusaur");
        assert_eq!(settings.speedup_cap(&venusaur), 0);
        assert_eq!(settings.threshold(&venusaur), i32::MAX);
    }

    #[test]
    fn aliasless_variant_uses_sentinels() {
        let settings = settings_with(&[("MEGA_SPEEDUPS_", "9"), ("MEGA_THRESHOLD_", "1")]);
        let eevee = Species::new("Eevee");
        assert_eq!(settings.speedup_cap(&eevee), 0);
        assert_eq!(settings.threshold(&eevee), i32::MAX);
        assert_eq!(settings.speedup_cap_key(&eevee), None);
        assert_eq!(settings.threshold_key(&eevee), None);
    }

    #[test]
    fn none_effect_is_configurable_like_any_other() {
        let settings = settings_with(&[("NONE", "40 50 60 70")]);
        assert_eq!(settings.odds(Effect::None, 4), 0.5);
        assert_eq!(settings.configured_categories(), vec![Effect::None]);
    }
}
