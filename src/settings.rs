//! Process-wide defaults consulted when resolver fields are left unset.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::resolver::LogLevel;

const DEFAULT_SETTINGS_FILE: &str = "plotkit.settings.json";

/// Optional process-wide defaults for resolver configuration.
///
/// Fields left unset here fall back to the library defaults: minified output,
/// non-legacy bundles, no runtime log level override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether JavaScript and CSS should be minified.
    pub minified: Option<bool>,
    /// Whether legacy browser bundles should be used.
    pub legacy: Option<bool>,
    /// Runtime log level for the client library.
    pub log_level: Option<LogLevel>,
}

impl Settings {
    /// Attempt to load settings from the provided directory.
    ///
    /// When the settings file does not exist or fails to parse we fall back to
    /// default values so downstream callers can continue operating with sensible
    /// assumptions.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_SETTINGS_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read settings from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Resolve `minified`, preferring the explicitly passed value.
    pub fn minified(&self, explicit: Option<bool>) -> bool {
        explicit.or(self.minified).unwrap_or(true)
    }

    /// Resolve `legacy`, preferring the explicitly passed value.
    pub fn legacy(&self, explicit: Option<bool>) -> bool {
        explicit.or(self.legacy).unwrap_or(false)
    }

    /// Resolve the log level, preferring the explicitly passed value.
    pub fn log_level(&self, explicit: Option<LogLevel>) -> Option<LogLevel> {
        explicit.or(self.log_level)
    }
}
