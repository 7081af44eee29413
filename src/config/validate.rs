//! Configuration validation.
//!
//! Validates configuration values and provides helpful error messages.
//! Problems the plugin can live with are reported as warnings instead.

use std::collections::HashSet;
use std::net::SocketAddr;

use fancy_regex::Regex;

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Validate a configuration and return detailed errors.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    let templates = [
        ("chatFormat", &config.chat_format),
        ("privateMessageSendFormat", &config.private_message_send_format),
        (
            "privateMessageReceiveFormat",
            &config.private_message_receive_format,
        ),
    ];
    for (key, template) in templates {
        if template.trim().is_empty() {
            errors.push(format!("{} must not be empty", key));
        }
    }

    for (i, entry) in config.regex.iter().enumerate() {
        if entry.search.is_empty() {
            errors.push(format!("regex[{}].search is required", i));
        }
    }

    if config.host.listen.parse::<SocketAddr>().is_err() {
        errors.push(format!(
            "host.listen '{}' is not a valid socket address",
            config.host.listen
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}

/// Collect non-fatal problems worth logging.
pub fn config_warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();

    let templates = [
        ("chatFormat", &config.chat_format),
        ("privateMessageSendFormat", &config.private_message_send_format),
        (
            "privateMessageReceiveFormat",
            &config.private_message_receive_format,
        ),
    ];
    for (key, template) in templates {
        if !template.is_empty() && !template.contains("%message%") {
            warnings.push(format!("{} does not contain %message%", key));
        }
    }

    let mut seen = HashSet::new();
    for server in &config.exclude_servers {
        if !seen.insert(server) {
            warnings.push(format!("excludeServers lists '{}' more than once", server));
        }
    }

    for (i, entry) in config.regex.iter().enumerate() {
        if entry.search.is_empty() {
            continue;
        }
        if let Err(e) = Regex::new(&entry.search) {
            warnings.push(format!(
                "regex[{}] '{}' is not a valid pattern and will be ignored: {}",
                i, entry.search, e
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::*;

    #[test]
    fn test_default_config_passes() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
        assert!(config_warnings(&config).is_empty());
    }

    #[test]
    fn test_errors_are_collected() {
        let config = Config {
            chat_format: "  ".to_string(),
            regex: vec![RegexEntry {
                search: String::new(),
                replace: "x".to_string(),
            }],
            host: HostConfig {
                listen: "not an address".to_string(),
                ..HostConfig::default()
            },
            ..Config::default()
        };

        let message = validate_config(&config).unwrap_err().to_string();
        assert!(message.contains("chatFormat must not be empty"));
        assert!(message.contains("regex[0].search"));
        assert!(message.contains("host.listen"));
    }

    #[test]
    fn test_warnings() {
        let config = Config {
            private_message_send_format: "To %target%".to_string(),
            exclude_servers: vec!["lobby".to_string(), "lobby".to_string()],
            regex: vec![RegexEntry {
                search: "[broken".to_string(),
                replace: String::new(),
            }],
            ..Config::default()
        };

        assert!(validate_config(&config).is_ok());
        let warnings = config_warnings(&config);
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("privateMessageSendFormat"));
        assert!(warnings[1].contains("lobby"));
        assert!(warnings[2].contains("[broken"));
    }
}
