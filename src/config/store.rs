//! The live configuration snapshot.
//!
//! Handlers take an `Arc<Settings>` once and work on it; a reload builds a
//! new snapshot and swaps it in, so a message never sees half of an old
//! and half of a new configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::chat::{compile_rules, RegexRule};
use crate::common::error::{ConfigError, ConfigResult};
use crate::common::PlayerHandle;
use crate::config::load_and_validate;
use crate::config::parser::save_default_config;
use crate::config::types::Config;

/// A configuration together with its compiled regex rules.
#[derive(Debug)]
pub struct Settings {
    pub config: Config,
    pub rules: Vec<RegexRule>,
}

impl Settings {
    pub fn new(config: Config) -> Self {
        let rules = compile_rules(
            config
                .regex
                .iter()
                .map(|entry| (entry.search.as_str(), entry.replace.as_str())),
        );
        Self { config, rules }
    }

    /// Whether `player` is on a server the relay ignores.
    pub fn is_excluded(&self, player: &PlayerHandle) -> bool {
        player.is_on_any(&self.config.exclude_servers)
    }
}

/// Copy-on-write holder of the current [`Settings`].
#[derive(Debug)]
pub struct ConfigStore {
    path: Option<PathBuf>,
    current: RwLock<Arc<Settings>>,
}

impl ConfigStore {
    /// A store over an in-memory config; `reload` is unavailable.
    pub fn new(config: Config) -> Self {
        Self {
            path: None,
            current: RwLock::new(Arc::new(Settings::new(config))),
        }
    }

    /// Load `path`, writing the bundled default first if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        save_default_config(path)?;
        let config = load_and_validate(path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            current: RwLock::new(Arc::new(Settings::new(config))),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Settings> {
        self.current.read().clone()
    }

    /// Swap in a new configuration.
    pub fn replace(&self, config: Config) -> Arc<Settings> {
        let settings = Arc::new(Settings::new(config));
        *self.current.write() = settings.clone();
        settings
    }

    /// Re-read the config file. On error the previous snapshot stays.
    pub fn reload(&self) -> ConfigResult<Arc<Settings>> {
        let path = self.path.as_deref().ok_or(ConfigError::NoSource)?;
        let config = load_and_validate(path)?;
        let settings = self.replace(config);
        info!(
            "Configuration reloaded from {} ({} regex rules)",
            path.display(),
            settings.rules.len()
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_settings_compile_rules() {
        let config = Config {
            regex: vec![
                crate::config::RegexEntry {
                    search: "[broken".to_string(),
                    replace: String::new(),
                },
                crate::config::RegexEntry {
                    search: "a".to_string(),
                    replace: "b".to_string(),
                },
            ],
            ..Config::default()
        };
        assert_eq!(Settings::new(config).rules.len(), 1);
    }

    #[test]
    fn test_is_excluded() {
        let settings = Settings::new(Config {
            exclude_servers: vec!["lobby".to_string()],
            ..Config::default()
        });
        assert!(settings.is_excluded(&PlayerHandle::new("A", Some("lobby"))));
        assert!(!settings.is_excluded(&PlayerHandle::new("A", Some("Lobby"))));
        assert!(!settings.is_excluded(&PlayerHandle::new("A", None)));
    }

    #[test]
    fn test_reload_swaps_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let store = ConfigStore::open(&path).unwrap();
        assert!(path.exists());

        let before = store.snapshot();
        assert!(before.config.always_global_chat);

        fs::write(&path, "alwaysGlobalChat: false\nexcludeServers: [auth]\n").unwrap();
        store.reload().unwrap();

        let after = store.snapshot();
        assert!(!after.config.always_global_chat);
        assert_eq!(after.config.exclude_servers, vec!["auth"]);
        // snapshots taken earlier are unaffected
        assert!(before.config.always_global_chat);
    }

    #[test]
    fn test_failed_reload_keeps_previous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "chatFormat: '%player% > %message%'\n").unwrap();
        let store = ConfigStore::open(&path).unwrap();

        fs::write(&path, "chatFormat: [oops").unwrap();
        assert!(store.reload().is_err());
        assert_eq!(store.snapshot().config.chat_format, "%player% > %message%");

        fs::write(&path, "chatFormat: ''\n").unwrap();
        assert!(matches!(
            store.reload(),
            Err(ConfigError::ValidationError { .. })
        ));
        assert_eq!(store.snapshot().config.chat_format, "%player% > %message%");
    }

    #[test]
    fn test_in_memory_store_cannot_reload() {
        let store = ConfigStore::new(Config::default());
        assert!(store.path().is_none());
        assert!(matches!(store.reload(), Err(ConfigError::NoSource)));
    }
}
