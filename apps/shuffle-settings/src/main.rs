//! # shuffle-settings
//!
//! Command line front-end for the shuffle-settings derived settings cache.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │              apps/shuffle-settings (THE BINARY)      │
//! │                                                      │
//! │   ┌─────────────┐        ┌───────────────────────┐   │
//! │   │    CLI      │───────▶│  FileStore (TOML)     │   │
//! │   │   (clap)    │        └──────────┬────────────┘   │
//! │   └──────┬──────┘                   │ load           │
//! │          ▼                          ▼                │
//! │   ┌──────────────────────────────────────────────┐   │
//! │   │      shuffle-settings-core (THE LOGIC)       │   │
//! │   │      EffectSettings<Effect, FileStore>       │   │
//! │   └──────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Odds table for every effect
//! shuffle-settings -c defaults.toml -c user.toml odds
//!
//! # Single lookup
//! shuffle-settings odds --effect HYPER_PUNCH --magnitude 4
//!
//! # Mega settings
//! shuffle-settings mega --species Gengar --mega "Mega Gengar"
//!
//! # Report malformed odds entries
//! shuffle-settings check
//! ```

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // SHUFFLE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("SHUFFLE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "shuffle_settings=debug,shuffle_settings_core=debug"
    } else {
        "shuffle_settings=info,shuffle_settings_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr; stdout carries command output.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
