use std::path::PathBuf;

use clap::Parser;

use crate::io::config_io::{ConfigError, default_config_path, read_config};
use crate::model::config::{Config, MAX_AUTOSAVE_MINUTES, Settings, autosave_interval};
use crate::model::task::Filter;

#[derive(Parser, Debug)]
#[command(name = "taskbox", about = "Edit a plain-text task list", version)]
pub struct Cli {
    /// Task list to edit (created on first save if missing)
    pub file: PathBuf,

    /// Which tasks to show at startup
    #[arg(long, value_enum, ignore_case = true)]
    pub status: Option<Filter>,

    /// Autosave interval in minutes (0 disables)
    #[arg(
        long,
        value_name = "MINUTES",
        value_parser = clap::value_parser!(u64).range(0..=MAX_AUTOSAVE_MINUTES)
    )]
    pub autosave: Option<u64>,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Read the config file and merge it under the command-line flags.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let config_path = self.config.clone().unwrap_or_else(default_config_path);
        let config = read_config(&config_path)?;
        self.merge(config)
    }

    /// Flags win over config values; unset in both means the default.
    pub fn merge(&self, config: Config) -> Result<Settings, ConfigError> {
        let minutes = self.autosave.or(config.autosave_minutes).unwrap_or(0);
        if minutes > MAX_AUTOSAVE_MINUTES {
            return Err(ConfigError::AutosaveRange {
                minutes,
                max: MAX_AUTOSAVE_MINUTES,
            });
        }
        Ok(Settings {
            path: self.file.clone(),
            filter: self.status.or(config.filter).unwrap_or_default(),
            autosave: autosave_interval(minutes),
            log_file: self.log_file.clone().or(config.log_file),
            ui: config.ui,
        })
    }
}
