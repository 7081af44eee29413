//! Environment variable overrides for configuration.
//!
//! - `FREEBUNGEECHAT_CONFIG` - path of the config file
//! - `FREEBUNGEECHAT_LISTEN` - listen address of the reference proxy

use std::env;

use crate::config::types::Config;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "FREEBUNGEECHAT";

/// Config file used when `FREEBUNGEECHAT_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "plugins/FreeBungeeChat/config.yml";

/// Apply environment variable overrides to a config.
pub fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(listen) = env::var(format!("{}_LISTEN", ENV_PREFIX)) {
        if !listen.is_empty() {
            config.host.listen = listen;
        }
    }
    config
}

/// Get the config file path from environment or use default.
pub fn get_config_path() -> String {
    env::var(format!("{}_CONFIG", ENV_PREFIX))
        .ok()
        .filter(|path| !path.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_prefix() {
        assert_eq!(ENV_PREFIX, "FREEBUNGEECHAT");
    }

    #[test]
    fn test_get_config_path() {
        env::remove_var("FREEBUNGEECHAT_CONFIG");
        assert_eq!(get_config_path(), DEFAULT_CONFIG_PATH);

        env::set_var("FREEBUNGEECHAT_CONFIG", "/tmp/fbc.yml");
        assert_eq!(get_config_path(), "/tmp/fbc.yml");
        env::remove_var("FREEBUNGEECHAT_CONFIG");
    }

    #[test]
    fn test_listen_override() {
        env::remove_var("FREEBUNGEECHAT_LISTEN");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.host.listen, "127.0.0.1:25577");

        env::set_var("FREEBUNGEECHAT_LISTEN", "0.0.0.0:30000");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.host.listen, "0.0.0.0:30000");
        env::remove_var("FREEBUNGEECHAT_LISTEN");
    }
}
