use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use super::task::Filter;

/// Contents of `config.toml`. Every key is optional; command-line flags win
/// over anything set here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Status filter applied at startup
    #[serde(default)]
    pub filter: Option<Filter>,
    /// Autosave interval in minutes; 0 disables autosave
    #[serde(default)]
    pub autosave_minutes: Option<u64>,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Color overrides by theme slot name, as "#RRGGBB"
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

/// Fully resolved startup settings handed to the editor.
#[derive(Debug, Clone)]
pub struct Settings {
    /// The task list file being edited
    pub path: PathBuf,
    pub filter: Filter,
    /// `None` when autosave is off
    pub autosave: Option<Duration>,
    pub log_file: Option<PathBuf>,
    pub ui: UiConfig,
}

impl Settings {
    /// Settings for `path` with every option at its default
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Settings {
            path: path.into(),
            filter: Filter::default(),
            autosave: None,
            log_file: None,
            ui: UiConfig::default(),
        }
    }

    /// Autosave interval in whole minutes, 0 when disabled
    pub fn autosave_minutes(&self) -> u64 {
        self.autosave.map_or(0, |d| d.as_secs() / 60)
    }
}

/// Longest autosave interval accepted, one week
pub const MAX_AUTOSAVE_MINUTES: u64 = 7 * 24 * 60;

/// Convert a minute count into an autosave interval; 0 means off. Counts are
/// range-checked against [`MAX_AUTOSAVE_MINUTES`] when settings are resolved;
/// here they saturate.
pub fn autosave_interval(minutes: u64) -> Option<Duration> {
    (minutes > 0).then(|| Duration::from_secs(minutes.saturating_mul(60)))
}
