// SPDX-License-Identifier: MPL-2.0
//! Loading and saving of the `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[notifications]` - Toast dwell interval
//! - `[diagnostics]` - Lifecycle event buffer
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `EDU_TOAST_CONFIG_DIR` environment variable (or `--config-dir`)
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use edu_toast::config;
//!
//! let (mut config, _warning) = config::load();
//! config.notifications.dwell_ms = Some(5_000);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::diagnostics::BufferCapacity;
use crate::domain::notification::DwellInterval;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Toast notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationsConfig {
    /// Time before a toast expires, in milliseconds.
    #[serde(default = "default_dwell_ms", skip_serializing_if = "Option::is_none")]
    pub dwell_ms: Option<u64>,
}

impl NotificationsConfig {
    /// Returns the validated dwell interval.
    #[must_use]
    pub fn dwell(&self) -> DwellInterval {
        DwellInterval::from_millis(self.dwell_ms.unwrap_or(DEFAULT_DWELL_MS))
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            dwell_ms: default_dwell_ms(),
        }
    }
}

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    /// Whether lifecycle events are recorded.
    #[serde(default = "default_diagnostics_enabled")]
    pub enabled: bool,

    /// Maximum number of events kept in memory.
    #[serde(
        default = "default_buffer_capacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub buffer_capacity: Option<usize>,
}

impl DiagnosticsConfig {
    /// Returns the validated buffer capacity.
    #[must_use]
    pub fn capacity(&self) -> BufferCapacity {
        BufferCapacity::new(
            self.buffer_capacity
                .unwrap_or(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
        )
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: default_diagnostics_enabled(),
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

// =============================================================================
// Main Config Struct
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationsConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

fn default_dwell_ms() -> Option<u64> {
    Some(DEFAULT_DWELL_MS)
}

fn default_diagnostics_enabled() -> bool {
    true
}

fn default_buffer_capacity() -> Option<usize> {
    Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// the default config with a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "falling back to default config");
                    return (
                        Config::default(),
                        Some(format!("could not load {}: {err}", path.display())),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Saves the configuration to the default path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration into a custom directory.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    match get_config_path_with_override(base_dir) {
        Some(path) => save_to_path(config, &path),
        None => Ok(()),
    }
}

/// Saves configuration to a specific path, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
