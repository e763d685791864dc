//! Configuration module for SoftScreen.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.
//! A missing file is not an error: every key has a default.

pub mod color;
pub mod types;

use std::path::PathBuf;
use std::sync::OnceLock;

pub use color::{Rgba, parse_hex_color};
pub use types::{
    ConfigError, DisplayConfig, HeadlessConfig, SoftScreenConfig, config_paths,
    load_config as load_config_default, load_config_from_path,
};

/// Global configuration instance, loaded once.
static CONFIG: OnceLock<SoftScreenConfig> = OnceLock::new();

/// Path to the currently loaded configuration file.
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Custom config path override (set via CLI --config flag).
static CUSTOM_CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Sets a custom configuration file path to use instead of the default search paths.
///
/// This must be called before `init()` or `get_config()` to take effect.
///
/// Returns `false` if a path was already set.
pub fn set_custom_config_path(path: PathBuf) -> bool { CUSTOM_CONFIG_PATH.set(path).is_ok() }

/// Loads a configuration, honoring the custom path override.
///
/// # Errors
///
/// Returns the [`ConfigError`] produced while locating or parsing the file.
pub fn load_config() -> Result<(SoftScreenConfig, PathBuf), ConfigError> {
    match CUSTOM_CONFIG_PATH.get() {
        Some(path) => load_config_from_path(path).map(|config| (config, path.clone())),
        None => load_config_default(),
    }
}

fn load_or_default() -> SoftScreenConfig {
    match load_config() {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "loaded configuration");
            let _ = CONFIG_PATH.set(path);
            config
        }
        Err(ConfigError::NotFound) => {
            tracing::debug!("no configuration file found, using defaults");
            SoftScreenConfig::default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load configuration, using defaults");
            SoftScreenConfig::default()
        }
    }
}

/// Initializes and returns the global configuration instance.
///
/// Idempotent: later calls return the same instance.
pub fn init() -> &'static SoftScreenConfig { CONFIG.get_or_init(load_or_default) }

/// Returns the global configuration instance, initializing it if necessary.
pub fn get_config() -> &'static SoftScreenConfig { CONFIG.get_or_init(load_or_default) }

/// Returns the path to the loaded configuration file, if any.
pub fn get_config_path() -> Option<&'static PathBuf> { CONFIG_PATH.get() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_are_usable() {
        let config = SoftScreenConfig::default();
        assert_eq!(config.background_rgba().unwrap(), Rgba::BLACK);
        assert!(parse_hex_color("#abc").is_ok());
    }

    #[test]
    fn test_get_config_never_fails() {
        let config = get_config();
        assert!(std::ptr::eq(config, init()));
    }
}
