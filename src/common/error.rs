//! Error types for the plugin.

use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },

    #[error("Configuration was not loaded from a file")]
    NoSource,
}

/// Errors raised while handing a message to a player.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Player {player} is not connected")]
    NotConnected { player: String },

    #[error("Connection of {player} is closed")]
    ConnectionClosed { player: String },
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for message delivery.
pub type DeliveryResult<T> = std::result::Result<T, DeliveryError>;
