//! # shuffle-settings CLI Module
//!
//! ## Available Commands
//!
//! - `odds` - Show the odds table, one effect, or a single lookup
//! - `mega` - Show the mega speedup cap and threshold for a species
//! - `check` - Report malformed odds entries
//! - `keys` - Show the derived config keys for a mega alias

mod commands;

use clap::{Parser, Subcommand};
use shuffle_settings_core::SettingsError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// shuffle-settings - typed effect odds and mega settings
///
/// Config files are flat TOML documents. Later files override earlier ones.
#[derive(Parser, Debug)]
#[command(name = "shuffle-settings")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config layers, lowest precedence first (repeatable)
    #[arg(short, long = "config", global = true, default_value = "shuffle-settings.toml")]
    pub configs: Vec<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show effect odds
    Odds {
        /// Effect name (e.g. HYPER_PUNCH); all effects if omitted
        #[arg(short, long)]
        effect: Option<String>,

        /// Combo size to look up (clamped into 3..=6)
        #[arg(short, long, requires = "effect", allow_negative_numbers = true)]
        magnitude: Option<i32>,
    },

    /// Show mega speedup cap and threshold
    Mega {
        /// Species name
        #[arg(short, long)]
        species: String,

        /// Mega form name; the species has no mega if omitted
        #[arg(short, long)]
        mega: Option<String>,
    },

    /// Report malformed odds entries
    Check,

    /// Show derived config keys for a mega alias
    Keys {
        /// Mega form name
        #[arg(short, long)]
        mega: String,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), SettingsError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Odds { effect, magnitude }) => {
            cmd_odds(&cli.configs, json_mode, effect.as_deref(), magnitude)
        }
        Some(Commands::Mega { species, mega }) => {
            cmd_mega(&cli.configs, json_mode, &species, mega.as_deref())
        }
        Some(Commands::Check) => cmd_check(&cli.configs, json_mode),
        Some(Commands::Keys { mega }) => cmd_keys(json_mode, &mega),
        None => {
            // No subcommand - show the odds table by default
            cmd_odds(&cli.configs, json_mode, None, None)
        }
    }
}
