// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for plugkit test harnesses.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key fails
//! loudly instead of silently falling back to a default.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level plugkit configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlugkitConfig {
    /// Temporary work directory settings.
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Metadata seeded into every mock context.
    #[serde(default)]
    pub process: ProcessConfig,

    /// Object storage fake settings.
    #[serde(default)]
    pub object_storage: ObjectStorageConfig,

    /// Secret service fake settings.
    #[serde(default)]
    pub secrets: SecretsConfig,

    /// Test log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PlugkitConfig {
    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Where and how per-test work directories are created.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Base directory work directories are created under.
    #[serde(default = "default_tmp_dir")]
    pub tmp_dir: PathBuf,

    /// File name prefix for each work directory.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Keep work directories after the harness is dropped.
    #[serde(default)]
    pub keep: bool,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            tmp_dir: default_tmp_dir(),
            prefix: default_prefix(),
            keep: false,
        }
    }
}

fn default_tmp_dir() -> PathBuf {
    PathBuf::from("/tmp/concord")
}

fn default_prefix() -> String {
    "test".to_string()
}

/// Process metadata exposed to plugins through the mock context.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessConfig {
    /// Session key stored under `processInfo.sessionKey`.
    #[serde(default = "default_session_key")]
    pub session_key: String,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            session_key: default_session_key(),
        }
    }
}

fn default_session_key() -> String {
    "xyz".to_string()
}

/// Object storage fake configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectStorageConfig {
    /// Address returned for every bucket the fake creates.
    #[serde(default = "default_object_storage_address")]
    pub address: String,
}

impl Default for ObjectStorageConfig {
    fn default() -> Self {
        Self {
            address: default_object_storage_address(),
        }
    }
}

fn default_object_storage_address() -> String {
    "http://localhost:8080/test".to_string()
}

/// Secret service fake configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SecretsConfig {
    /// Private key copied into the work directory for key exports.
    #[serde(default)]
    pub private_key_path: Option<PathBuf>,

    /// Name of the fallback key file looked up as `~/.aws/<name>.pem`.
    #[serde(default = "default_key_name")]
    pub key_name: String,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            private_key_path: None,
            key_name: default_key_name(),
        }
    }
}

fn default_key_name() -> String {
    "concord-integration-tests".to_string()
}

impl SecretsConfig {
    /// The private key to export: the explicit path if set, otherwise the
    /// fallback file under the home directory when it exists.
    pub fn resolve_private_key(&self) -> Option<PathBuf> {
        if let Some(path) = &self.private_key_path {
            return Some(path.clone());
        }
        let fallback = dirs::home_dir()?
            .join(".aws")
            .join(format!("{}.pem", self.key_name));
        fallback.exists().then_some(fallback)
    }
}

/// Log output for tests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_layout() {
        let config = PlugkitConfig::default();
        assert_eq!(config.workspace.tmp_dir, PathBuf::from("/tmp/concord"));
        assert_eq!(config.workspace.prefix, "test");
        assert!(!config.workspace.keep);
        assert_eq!(config.process.session_key, "xyz");
        assert_eq!(config.secrets.key_name, "concord-integration-tests");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn effective_config_renders_as_toml() {
        let rendered = PlugkitConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[workspace]"));
        assert!(rendered.contains("tmp_dir = \"/tmp/concord\""));
    }

    #[test]
    fn explicit_private_key_wins() {
        let secrets = SecretsConfig {
            private_key_path: Some(PathBuf::from("/keys/id.pem")),
            ..SecretsConfig::default()
        };
        assert_eq!(
            secrets.resolve_private_key(),
            Some(PathBuf::from("/keys/id.pem"))
        );
    }

    #[test]
    fn missing_fallback_key_resolves_to_none() {
        let secrets = SecretsConfig {
            private_key_path: None,
            key_name: "plugkit-no-such-key-0d5c".to_string(),
        };
        assert_eq!(secrets.resolve_private_key(), None);
    }
}
