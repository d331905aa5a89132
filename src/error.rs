//! # Error Types
//!
//! Custom error types for Keyboard Teleop using `thiserror`.

use thiserror::Error;

/// Main error type for Keyboard Teleop
#[derive(Debug, Error)]
pub enum TeleopError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Keyboard input errors (device read failures, closed channel)
    #[error("Input error: {0}")]
    Input(String),

    /// No usable keyboard found under /dev/input
    #[error("No keyboard input device found")]
    InputDeviceNotFound,

    /// Velocity sink errors
    #[error("Output error: {0}")]
    Output(String),

    /// Command encoding errors
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type alias for Keyboard Teleop
pub type Result<T> = std::result::Result<T, TeleopError>;
