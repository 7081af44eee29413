//! Configuration file parsing (YAML format).

use std::fs;
use std::path::Path;

use tracing::info;

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// The `config.yml` written on first start.
pub const DEFAULT_CONFIG: &str = include_str!("../../resources/config.yml");

/// Load configuration from a YAML file.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;
    load_config_str(&content)
}

/// Load configuration from a YAML string.
///
/// A document without any keys yields the defaults.
pub fn load_config_str(content: &str) -> Result<Config, ConfigError> {
    let blank = content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#') || line == "---");
    if blank {
        return Ok(Config::default());
    }
    serde_yaml_ng::from_str(content).map_err(|e| ConfigError::ParseError {
        message: e.to_string(),
    })
}

/// Write the bundled config to `path` unless a file is already there.
///
/// Returns whether a file was written.
pub fn save_default_config(path: impl AsRef<Path>) -> Result<bool, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }
    let io_error = |source: std::io::Error| ConfigError::IoError {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, DEFAULT_CONFIG).map_err(io_error)?;
    info!("Wrote default configuration to {}", path.display());
    Ok(true)
}
