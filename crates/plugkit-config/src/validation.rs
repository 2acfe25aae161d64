// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::PlugkitConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure rather than stopping at the first.
pub fn validate_config(config: &PlugkitConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.workspace.tmp_dir.as_os_str().is_empty() {
        errors.push(ConfigError::Validation {
            message: "workspace.tmp_dir must not be empty".to_string(),
        });
    }

    let prefix = config.workspace.prefix.trim();
    if prefix.is_empty() {
        errors.push(ConfigError::Validation {
            message: "workspace.prefix must not be empty".to_string(),
        });
    } else if prefix.contains(std::path::is_separator) {
        errors.push(ConfigError::Validation {
            message: format!("workspace.prefix `{prefix}` must not contain a path separator"),
        });
    }

    if config.process.session_key.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "process.session_key must not be empty".to_string(),
        });
    }

    let address = config.object_storage.address.trim();
    if !(address.starts_with("http://") || address.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("object_storage.address `{address}` must be an http(s) URL"),
        });
    }

    if let Some(path) = &config.secrets.private_key_path
        && path.as_os_str().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "secrets.private_key_path must not be empty when set".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.logging.level.to_ascii_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` must be one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&PlugkitConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = PlugkitConfig::default();
        config.workspace.prefix = "  ".to_string();
        config.process.session_key = String::new();
        config.object_storage.address = "ftp://example".to_string();
        config.logging.level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn prefix_with_separator_is_rejected() {
        let mut config = PlugkitConfig::default();
        config.workspace.prefix = "a/b".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("path separator"));
    }
}
