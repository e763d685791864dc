//! Configuration types for SoftScreen.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Every key is optional; anything left out takes its default value.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::color::{Rgba, parse_hex_color};
use crate::constants::timing::DEFAULT_DEFER_TICKS;
use crate::display::Display;
use crate::geometry::Rect;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SoftScreenConfig {
    /// Index of the display the overlay is placed on.
    /// Out-of-range indices fall back to display 0.
    /// Default: 0
    pub display: usize,

    /// Event-loop ticks to wait before running a deferred transition.
    /// Default: 2
    pub defer_ticks: u32,

    /// Keep the overlay above all other windows.
    /// Default: false
    pub always_on_top: bool,

    /// Overlay background as `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    /// Default: "#000000"
    pub background: String,

    /// Settings for the in-memory host used by the CLI and tests.
    pub headless: HeadlessConfig,
}

impl Default for SoftScreenConfig {
    fn default() -> Self {
        Self {
            display: 0,
            defer_ticks: DEFAULT_DEFER_TICKS,
            always_on_top: false,
            background: Rgba::BLACK.to_hex(),
            headless: HeadlessConfig::default(),
        }
    }
}

impl SoftScreenConfig {
    /// Parses the configured background color.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the color string is malformed.
    pub fn background_rgba(&self) -> Result<Rgba, ConfigError> {
        parse_hex_color(&self.background).map_err(ConfigError::InvalidValue)
    }

    /// Checks values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` describing the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.background_rgba()?;
        for (i, display) in self.headless.displays.iter().enumerate() {
            if display.width <= 0 || display.height <= 0 {
                return Err(ConfigError::InvalidValue(format!(
                    "headless.displays[{i}] must have a positive size, got {}x{}",
                    display.width, display.height
                )));
            }
        }
        Ok(())
    }
}

/// In-memory host settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct HeadlessConfig {
    /// Displays reported by the headless window system, in order.
    /// Default: a single 1920x1080 display at the origin.
    pub displays: Vec<DisplayConfig>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            displays: vec![DisplayConfig {
                name: "Display 1".to_string(),
                x: 0,
                y: 0,
                width: 1920,
                height: 1080,
            }],
        }
    }
}

impl HeadlessConfig {
    /// Converts the configured displays into enumerated displays.
    #[must_use]
    pub fn to_displays(&self) -> Vec<Display> {
        self.displays
            .iter()
            .enumerate()
            .map(|(index, d)| {
                Display::new(index, d.name.clone(), Rect::new(d.x, d.y, d.width, d.height))
            })
            .collect()
    }
}

/// A display of the headless window system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfig {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Left edge in global coordinates.
    #[serde(default)]
    pub x: i32,
    /// Top edge in global coordinates.
    #[serde(default)]
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "No configuration file found. Expected at ~/.config/softscreen/config.jsonc \
         or ~/.softscreen.jsonc"
    )]
    NotFound,
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] serde_json::Error),
    /// A value parsed but is not acceptable.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Configuration file names in the home directory.
const HOME_CONFIG_FILE_NAMES: &[&str] = &[".softscreen.jsonc", ".softscreen.json"];

/// Name of the configuration directory.
const APP_DIR: &str = "softscreen";

/// Returns the possible configuration file paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/softscreen/config.jsonc` or `config.json`
/// 2. `~/.config/softscreen/config.jsonc` or `config.json`
/// 3. The platform config dir (`~/Library/Application Support` on macOS)
/// 4. `~/.softscreen.jsonc` or `~/.softscreen.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let push_dir = |dir: PathBuf, paths: &mut Vec<PathBuf>| {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    };

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        push_dir(PathBuf::from(xdg_config).join(APP_DIR), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        push_dir(home.join(".config").join(APP_DIR), &mut paths);
    }

    if let Some(config_dir) = dirs::config_dir() {
        push_dir(config_dir.join(APP_DIR), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        for filename in HOME_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Loads the configuration from the first available config file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists, or the
/// error from [`load_config_from_path`] for the file that was found.
pub fn load_config() -> Result<(SoftScreenConfig, PathBuf), ConfigError> {
    for path in config_paths() {
        if path.exists() {
            let config = load_config_from_path(&path)?;
            return Ok((config, path));
        }
    }

    Err(ConfigError::NotFound)
}

/// Loads and validates the configuration at `path`.
///
/// Both single-line (`//`) and multi-line (`/* */`) comments are stripped
/// before parsing.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist,
/// `ConfigError::IoError` if it cannot be read, `ConfigError::ParseError`
/// for invalid JSON and `ConfigError::InvalidValue` for values that fail
/// validation.
pub fn load_config_from_path(path: &Path) -> Result<SoftScreenConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }
    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    let config: SoftScreenConfig = serde_json::from_reader(reader)?;
    config.validate()?;
    Ok(config)
}
