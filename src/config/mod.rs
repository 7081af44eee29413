//! Configuration parsing and types.

pub mod env;
pub mod parser;
pub mod store;
pub mod types;
pub mod validate;

use std::path::Path;

use tracing::warn;

use crate::common::error::ConfigResult;

pub use parser::{load_config, load_config_str, save_default_config, DEFAULT_CONFIG};
pub use store::{ConfigStore, Settings};
pub use types::*;

/// Load a config file, apply environment overrides and validate it.
///
/// Warnings are logged; errors reject the whole file.
pub fn load_and_validate(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let config = env::apply_env_overrides(load_config(path)?);
    validate::validate_config(&config)?;
    for warning in validate::config_warnings(&config) {
        warn!("Config: {}", warning);
    }
    Ok(config)
}
