//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::error::{Result, TeleopError};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub teleop: TeleopConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Speed limits and publishing rate
#[derive(Debug, Deserialize, Clone)]
pub struct TeleopConfig {
    /// Magnitude applied to the linear and lateral axes (m/s)
    #[serde(default = "default_max_linear")]
    pub max_linear: f64,

    /// Magnitude applied to the angular axis (rad/s)
    #[serde(default = "default_max_angular")]
    pub max_angular: f64,

    /// How often the held command is republished
    #[serde(default = "default_publish_rate_hz")]
    pub publish_rate_hz: u32,
}

/// Keyboard device configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct InputConfig {
    /// Empty means auto-detect
    #[serde(default)]
    pub device_path: String,
}

/// Where velocity commands go
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    Stdout,
    Udp,
}

/// Output configuration
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_sink")]
    pub sink: SinkKind,

    #[serde(default = "default_topic")]
    pub topic: String,

    #[serde(default = "default_udp_address")]
    pub udp_address: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Empty means log to stderr only
    #[serde(default)]
    pub log_dir: String,
}

// Default value functions
fn default_max_linear() -> f64 { 0.5 }
fn default_max_angular() -> f64 { 1.0 }
fn default_publish_rate_hz() -> u32 { 10 }

fn default_sink() -> SinkKind { SinkKind::Stdout }
fn default_topic() -> String { "cmd_vel".to_string() }
fn default_udp_address() -> String { "127.0.0.1:9870".to_string() }

fn default_log_level() -> String { "info".to_string() }

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            max_linear: default_max_linear(),
            max_angular: default_max_angular(),
            publish_rate_hz: default_publish_rate_hz(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sink: default_sink(),
            topic: default_topic(),
            udp_address: default_udp_address(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use keyboard_teleop::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to built-in defaults
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("max_linear", self.teleop.max_linear),
            ("max_angular", self.teleop.max_angular),
        ] {
            if !value.is_finite() || value <= 0.0 || value > 10.0 {
                return Err(invalid(format!("{} must be greater than 0.0 and at most 10.0", name)));
            }
        }

        if self.teleop.publish_rate_hz == 0 || self.teleop.publish_rate_hz > 100 {
            return Err(invalid("publish_rate_hz must be between 1 and 100"));
        }

        if self.output.topic.is_empty() {
            return Err(invalid("output topic cannot be empty"));
        }

        if self.output.sink == SinkKind::Udp
            && self.output.udp_address.parse::<SocketAddr>().is_err()
        {
            return Err(invalid(format!(
                "udp_address '{}' is not a valid socket address",
                self.output.udp_address
            )));
        }

        if !["trace", "debug", "info", "warn", "error"].contains(&self.logging.level.as_str()) {
            return Err(invalid("log level must be one of: trace, debug, info, warn, error"));
        }

        Ok(())
    }
}

fn invalid(msg: impl std::fmt::Display) -> TeleopError {
    TeleopError::Config(toml::de::Error::custom(msg))
}
