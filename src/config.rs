// src/config.rs
//! Reader configuration stored as JSON under the user's config directory

use crate::{
    error::{GpsError, Result},
    monitor::PollSettings,
};
use serde::{Deserialize, Serialize};
use std::{path::{Path, PathBuf}, time::Duration};

/// How fixes are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub serial_port: Option<String>,
    pub serial_baudrate: u32,
    pub read_chunk: usize,
    pub read_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub heartbeat_every: u32,
    pub output: OutputFormat,
    pub color: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            serial_port: None,
            serial_baudrate: 9600,
            read_chunk: 127,
            read_timeout_ms: 100,
            poll_interval_ms: 1000,
            heartbeat_every: 10,
            output: OutputFormat::Text,
            color: true,
        }
    }
}

impl ReaderConfig {
    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| GpsError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| GpsError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| GpsError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(path, contents)
            .map_err(|e| GpsError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| GpsError::Config("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config").join("nmea-fix").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.read_chunk == 0 {
            return Err(GpsError::Config("read_chunk must be at least 1 byte".to_string()));
        }
        if self.serial_baudrate == 0 {
            return Err(GpsError::Config("serial_baudrate must be positive".to_string()));
        }
        Ok(())
    }

    /// Update serial port settings
    pub fn update_serial(&mut self, port: String, baudrate: u32) {
        self.serial_port = Some(port);
        self.serial_baudrate = baudrate;
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            read_chunk: self.read_chunk,
            read_timeout: Duration::from_millis(self.read_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            heartbeat_every: self.heartbeat_every,
        }
    }
}
