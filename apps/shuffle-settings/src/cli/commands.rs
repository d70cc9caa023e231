//! # CLI Command Implementations
//!
//! Each command loads the config layers into an `EffectSettings`, then
//! renders its answer as text or JSON. Rendering is kept separate from
//! printing so it can be tested.

use shuffle_settings_core::{
    Category, Effect, EffectSettings, FileStore, Odds, SettingsError, Species,
    speedup_cap_key, threshold_key,
};
use std::path::PathBuf;

/// Settings as loaded by every command.
pub type CliSettings = EffectSettings<Effect, FileStore>;

/// Build settings over `configs` and perform the initial load.
pub fn load_settings(configs: &[PathBuf]) -> Result<CliSettings, SettingsError> {
    let settings = CliSettings::new(FileStore::new(configs.iter().cloned()));
    let changed = settings.reload()?;
    tracing::debug!(
        layers = configs.len(),
        changed,
        overrides = settings.configured_categories().len(),
        "settings loaded"
    );
    Ok(settings)
}

// =============================================================================
// ODDS COMMAND
// =============================================================================

/// Show odds for all effects, one effect, or a single magnitude.
pub fn cmd_odds(
    configs: &[PathBuf],
    json_mode: bool,
    effect: Option<&str>,
    magnitude: Option<i32>,
) -> Result<(), SettingsError> {
    let settings = load_settings(configs)?;

    let output = match effect {
        None => render_odds_table(&settings, json_mode),
        Some(name) => {
            let effect: Effect = name.parse()?;
            match magnitude {
                Some(m) => render_single_odds(&settings, effect, m, json_mode),
                None => render_effect_odds(&settings, effect, json_mode),
            }
        }
    };
    println!("{}", output);
    Ok(())
}

/// Render every effect's four buckets.
pub fn render_odds_table(settings: &CliSettings, json_mode: bool) -> String {
    let table = settings.snapshot();

    if json_mode {
        let entries: Vec<_> = Effect::all()
            .iter()
            .map(|&effect| effect_json(effect, table.get(&effect).copied()))
            .collect();
        return serde_json::Value::Array(entries).to_string();
    }

    let mut out = format!(
        "{:<20} {:>6} {:>6} {:>6} {:>6}\n",
        "EFFECT", "3", "4", "5", "6+"
    );
    for &effect in Effect::all() {
        out.push_str(&effect_row(effect, table.get(&effect).copied()));
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Render one effect's four buckets.
pub fn render_effect_odds(settings: &CliSettings, effect: Effect, json_mode: bool) -> String {
    let entry = settings.odds_entry(effect);
    if json_mode {
        effect_json(effect, entry).to_string()
    } else {
        effect_row(effect, entry)
    }
}

/// Render a single clamped lookup.
pub fn render_single_odds(
    settings: &CliSettings,
    effect: Effect,
    magnitude: i32,
    json_mode: bool,
) -> String {
    let odds = settings.odds(effect, magnitude);
    if json_mode {
        serde_json::json!({
            "effect": effect.name(),
            "magnitude": magnitude,
            "odds": odds,
        })
        .to_string()
    } else {
        format!("{} @ {}: {}", effect, magnitude, odds)
    }
}

fn effect_row(effect: Effect, entry: Option<Odds>) -> String {
    let values = entry.unwrap_or_default().values();
    let marker = if entry.is_some() { "" } else { " (default)" };
    format!(
        "{:<20} {:>6.2} {:>6.2} {:>6.2} {:>6.2}{}",
        effect.name(),
        values[0],
        values[1],
        values[2],
        values[3],
        marker
    )
}

fn effect_json(effect: Effect, entry: Option<Odds>) -> serde_json::Value {
    serde_json::json!({
        "effect": effect.name(),
        "configured": entry.is_some(),
        "odds": entry.unwrap_or_default(),
    })
}

// =============================================================================
// MEGA COMMAND
// =============================================================================

/// Show the mega speedup cap and threshold for a species.
pub fn cmd_mega(
    configs: &[PathBuf],
    json_mode: bool,
    species: &str,
    mega: Option<&str>,
) -> Result<(), SettingsError> {
    let settings = load_settings(configs)?;
    let species = match mega {
        Some(alias) => Species::with_mega(species, alias),
        None => Species::new(species),
    };
    println!("{}", render_mega(&settings, &species, json_mode));
    Ok(())
}

/// Render mega settings for a species.
pub fn render_mega(settings: &CliSettings, species: &Species, json_mode: bool) -> String {
    let cap = settings.speedup_cap(species);
    let threshold = settings.threshold(species);

    if json_mode {
        return serde_json::json!({
            "species": species.name(),
            "mega": species.mega_name(),
            "speedup_cap": cap,
            "threshold": threshold,
        })
        .to_string();
    }

    let threshold_text = if threshold == i32::MAX {
        "unreachable".to_string()
    } else {
        threshold.to_string()
    };
    format!(
        "{} ({})\n  speedup cap: {}\n  threshold:   {}",
        species.name(),
        species.mega_name().unwrap_or("no mega"),
        cap,
        threshold_text
    )
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Report every malformed odds entry. Fails if any exist.
pub fn cmd_check(configs: &[PathBuf], json_mode: bool) -> Result<(), SettingsError> {
    let settings = load_settings(configs)?;
    let errors = settings.odds_errors();

    println!("{}", render_check(&errors, json_mode));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SettingsError::InvalidValue {
            key: "odds".to_string(),
            reason: format!("{} malformed odds entries", errors.len()),
        })
    }
}

/// Render the outcome of a check.
pub fn render_check(errors: &[(Effect, SettingsError)], json_mode: bool) -> String {
    if json_mode {
        let entries: Vec<_> = errors
            .iter()
            .map(|(effect, err)| {
                serde_json::json!({
                    "effect": effect.name(),
                    "error": err.to_string(),
                })
            })
            .collect();
        return serde_json::json!({ "ok": errors.is_empty(), "errors": entries }).to_string();
    }

    if errors.is_empty() {
        return "All odds entries are well-formed".to_string();
    }
    errors
        .iter()
        .map(|(effect, err)| format!("{}: {}", effect, err))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// KEYS COMMAND
// =============================================================================

/// Show the derived config keys for a mega alias.
pub fn cmd_keys(json_mode: bool, mega: &str) -> Result<(), SettingsError> {
    println!("{}", render_keys(mega, json_mode));
    Ok(())
}

/// Render the derived keys for a mega alias.
pub fn render_keys(mega: &str, json_mode: bool) -> String {
    let speedup = speedup_cap_key(mega);
    let threshold = threshold_key(mega);
    if json_mode {
        serde_json::json!({ "speedup_cap": speedup, "threshold": threshold }).to_string()
    } else {
        format!("{}\n{}", speedup, threshold)
    }
}
