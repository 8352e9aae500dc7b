//! Engine configuration loading from TOML
//!
//! # Configuration File Format
//!
//! ```toml
//! # seconds added to the controller-announced heartbeat interval
//! heartbeat_allowed_latency = 0.1
//!
//! # queued commands kept per action ring before the oldest is dropped
//! command_ring_capacity = 10
//!
//! # initial log gate; the controller overrides it via LOG_LEVEL_SELECT
//! log_level = 19
//!
//! # files and folders answered on FILE_REQUEST
//! [[files]]
//! identifier = "config"
//! path = "/etc/robot/robot.toml"
//!
//! [[files]]
//! identifier = "logs"
//! path = "/var/log/robot"
//! folder = true
//! ```
//!
//! All fields default sensibly; an empty file is a valid configuration.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One requestable file or folder definition
#[derive(Debug, Clone, Deserialize)]
pub struct FileDefEntry {
    /// Identifier the controller asks for
    pub identifier: String,

    /// Filesystem path answered for that identifier
    pub path: String,

    /// Serve the path as a recursively-read folder
    #[serde(default)]
    pub folder: bool,
}

/// Engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RobotConfig {
    /// Seconds of slack added to the heartbeat interval announced by the
    /// controller before the connection counts as lost
    #[serde(default = "default_heartbeat_latency")]
    pub heartbeat_allowed_latency: f32,

    /// Capacity of the simple/complex action command rings
    ///
    /// At capacity the oldest queued action is dropped.
    #[serde(default = "default_ring_capacity")]
    pub command_ring_capacity: usize,

    /// Initial log message gate, overridden by `LOG_LEVEL_SELECT`
    ///
    /// Defaults to one below the custom-level band, so everything except
    /// custom messages passes until the controller chooses.
    #[serde(default = "default_log_level")]
    pub log_level: u32,

    /// Files and folders served on `FILE_REQUEST`
    #[serde(default)]
    pub files: Vec<FileDefEntry>,
}

fn default_heartbeat_latency() -> f32 {
    0.1
}

fn default_ring_capacity() -> usize {
    10
}

fn default_log_level() -> u32 {
    crate::messages::LogLevel::Custom as u32 - 1
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            heartbeat_allowed_latency: default_heartbeat_latency(),
            command_ring_capacity: default_ring_capacity(),
            log_level: default_log_level(),
            files: Vec::new(),
        }
    }
}

impl RobotConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;

        let config: RobotConfig = basic_toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.command_ring_capacity == 0 {
            return Err(Error::Config(
                "command_ring_capacity must be at least 1".to_string(),
            ));
        }
        if !self.heartbeat_allowed_latency.is_finite() || self.heartbeat_allowed_latency < 0.0 {
            return Err(Error::Config(format!(
                "heartbeat_allowed_latency must be a non-negative number (got {})",
                self.heartbeat_allowed_latency
            )));
        }
        for entry in &self.files {
            if entry.identifier.is_empty() {
                return Err(Error::Config(
                    "file definition with empty identifier".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RobotConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.command_ring_capacity, 10);
        assert_eq!(config.log_level, 19);
    }

    #[test]
    fn parses_full_config() {
        let toml = r#"
            heartbeat_allowed_latency = 0.25
            command_ring_capacity = 4

            [[files]]
            identifier = "logs"
            path = "/var/log/robot"
            folder = true
        "#;
        let config: RobotConfig = basic_toml::from_str(toml).unwrap();
        config.validate().unwrap();

        assert_eq!(config.heartbeat_allowed_latency, 0.25);
        assert_eq!(config.command_ring_capacity, 4);
        assert_eq!(config.files.len(), 1);
        assert!(config.files[0].folder);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: RobotConfig = basic_toml::from_str("").unwrap();
        assert_eq!(config.heartbeat_allowed_latency, 0.1);
        assert!(config.files.is_empty());
    }

    #[test]
    fn zero_ring_capacity_is_rejected() {
        let config: RobotConfig = basic_toml::from_str("command_ring_capacity = 0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_latency_is_rejected() {
        let config: RobotConfig =
            basic_toml::from_str("heartbeat_allowed_latency = -1.0").unwrap();
        assert!(config.validate().is_err());
    }
}
