use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::BracksError;
use crate::transpiler::TranspileOptions;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory segment that marks the root of the bracks sources
    #[serde(default = "default_anchor_segment")]
    pub anchor_segment: String,

    /// Maximum number of files converted at the same time
    #[serde(default = "default_concurrent_conversions")]
    pub concurrent_conversions: usize,

    /// Quiet period after a file system event before re-converting
    #[serde(default = "default_watch_debounce_ms")]
    pub watch_debounce_ms: u64,

    /// Transpiler switches
    #[serde(default)]
    pub transpile: TranspileOptions,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_anchor_segment() -> String {
    "bracks".to_string()
}

fn default_concurrent_conversions() -> usize {
    8
}

fn default_watch_debounce_ms() -> u64 {
    200
}

impl Config {
    /// Load the configuration file, or the defaults when it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Config file not found at {:?}, using defaults.", path);
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> crate::errors::Result<()> {
        if self.anchor_segment.trim().is_empty() {
            return Err(BracksError::Config("Anchor segment cannot be empty".to_string()));
        }

        if self.anchor_segment.contains(['/', '\\']) {
            return Err(BracksError::Config(format!(
                "Anchor segment must be a single directory name, got '{}'",
                self.anchor_segment
            )));
        }

        if self.concurrent_conversions == 0 {
            return Err(BracksError::Config(
                "concurrent_conversions must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            anchor_segment: default_anchor_segment(),
            concurrent_conversions: default_concurrent_conversions(),
            watch_debounce_ms: default_watch_debounce_ms(),
            transpile: TranspileOptions::default(),
            log_level: LogLevel::default(),
        }
    }
}
