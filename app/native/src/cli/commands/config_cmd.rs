//! Config CLI commands.

use clap::Subcommand;
use colored::Colorize;

use crate::cli::output;
use crate::config::{self, ConfigError, config_paths};
use crate::error::SoftScreenError;

/// Configuration inspection commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Show where configuration files are looked up.
    ///
    /// Lists the search paths in priority order and marks the one in use.
    Path,

    /// Print the effective configuration as JSON.
    ///
    /// Values missing from the file are shown with their defaults.
    Show,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the configuration file exists but cannot be loaded.
pub fn execute(cmd: &ConfigCommands) -> Result<(), SoftScreenError> {
    match cmd {
        ConfigCommands::Path => {
            show_config_path();
            Ok(())
        }
        ConfigCommands::Show => show_config(),
    }
}

fn show_config_path() {
    println!("Configuration file search paths (in priority order):\n");

    let paths = config_paths();
    let loaded = config::load_config();
    let active = loaded.as_ref().ok().map(|(_, path)| path);

    for (i, path) in paths.iter().enumerate() {
        let marker = if active == Some(path) {
            " (active)".green().to_string()
        } else if path.exists() {
            " (exists)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("  {}. {}{marker}", i + 1, path.display());
    }

    match &loaded {
        Ok((_, path)) if !paths.contains(path) => {
            println!("\n  --config {} {}", path.display(), "(active)".green());
        }
        Ok(_) => {}
        Err(ConfigError::NotFound) => println!("\nNo configuration file found; defaults are in effect."),
        Err(err) => println!("\n{} {err}", "Error:".red()),
    }
}

fn show_config() -> Result<(), SoftScreenError> {
    let config = match config::load_config() {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "showing configuration");
            config
        }
        Err(ConfigError::NotFound) => config::SoftScreenConfig::default(),
        Err(err) => return Err(err.into()),
    };

    let value = serde_json::to_value(&config).map_err(|e| SoftScreenError::Config(e.to_string()))?;
    output::print_highlighted_json(&value);
    Ok(())
}
