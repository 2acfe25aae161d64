// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./plugkit.toml` > `~/.config/plugkit/plugkit.toml` > `/etc/plugkit/plugkit.toml`
//! with environment variable overrides via the `PLUGKIT_` prefix. Environment
//! variables are read through an [`EnvProvider`], never from `std::env` directly.

use std::path::Path;

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::Serialize;

use crate::diagnostic::{self, ConfigError};
use crate::env::{EnvProvider, ProcessEnv};
use crate::model::PlugkitConfig;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "PLUGKIT_";

/// Legacy variable naming the base directory for work directories.
pub const TMP_DIR_VAR: &str = "CONCORD_TMP_DIR";

/// Legacy variable naming the private key handed out by the secret service.
pub const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY_PATH";

/// Config sections that accept `PLUGKIT_<SECTION>_<FIELD>` overrides.
const SECTIONS: &[&str] = &["workspace", "process", "object_storage", "secrets", "logging"];

/// How an override's raw text becomes a config value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Flag,
}

impl FieldKind {
    fn expected(self) -> &'static str {
        match self {
            FieldKind::Text => "a string",
            FieldKind::Flag => "one of `true`, `false`, `1`, `0`",
        }
    }

    fn parse(self, raw: &str) -> Option<OverrideValue> {
        match self {
            FieldKind::Text => Some(OverrideValue::Text(raw.to_string())),
            FieldKind::Flag => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Some(OverrideValue::Flag(true)),
                "false" | "0" => Some(OverrideValue::Flag(false)),
                _ => None,
            },
        }
    }
}

/// Every overridable field. Text fields are taken verbatim, so
/// `PLUGKIT_PROCESS_SESSION_KEY=12345` stays the string `"12345"`.
const FIELDS: &[(&str, FieldKind)] = &[
    ("workspace.tmp_dir", FieldKind::Text),
    ("workspace.prefix", FieldKind::Text),
    ("workspace.keep", FieldKind::Flag),
    ("process.session_key", FieldKind::Text),
    ("object_storage.address", FieldKind::Text),
    ("secrets.private_key_path", FieldKind::Text),
    ("secrets.key_name", FieldKind::Text),
    ("logging.level", FieldKind::Text),
];

/// A typed value taken from an environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OverrideValue {
    Text(String),
    Flag(bool),
}

/// An environment variable mapped onto a dotted config key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvOverride {
    /// Variable the value came from.
    pub var: String,
    /// Dotted config key, e.g. `workspace.prefix`.
    pub key: &'static str,
    pub value: OverrideValue,
}

/// Load configuration from the standard XDG hierarchy with process env overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/plugkit/plugkit.toml` (system-wide)
/// 3. `~/.config/plugkit/plugkit.toml` (user XDG config)
/// 4. `./plugkit.toml` (local directory)
/// 5. Legacy variables (`CONCORD_TMP_DIR`, `PRIVATE_KEY_PATH`)
/// 6. `PLUGKIT_*` environment variables
pub fn load_config() -> Result<PlugkitConfig, Vec<ConfigError>> {
    load_config_with_env(&ProcessEnv)
}

/// Same as [`load_config`] but reading variables from `env`.
pub fn load_config_with_env(env: &dyn EnvProvider) -> Result<PlugkitConfig, Vec<ConfigError>> {
    let overrides = env_overrides(env)?;
    let files = defaults()
        .merge(Toml::file("/etc/plugkit/plugkit.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("plugkit/plugkit.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("plugkit.toml"));
    extract(apply_overrides(files, &overrides), None)
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PlugkitConfig, Vec<ConfigError>> {
    extract(defaults().merge(Toml::string(toml_content)), Some(toml_content))
}

/// Load configuration from a TOML string with env overrides from `env`.
pub fn load_config_from_str_with_env(
    toml_content: &str,
    env: &dyn EnvProvider,
) -> Result<PlugkitConfig, Vec<ConfigError>> {
    let overrides = env_overrides(env)?;
    let figment = defaults().merge(Toml::string(toml_content));
    extract(apply_overrides(figment, &overrides), Some(toml_content))
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(
    path: &Path,
    env: &dyn EnvProvider,
) -> Result<PlugkitConfig, Vec<ConfigError>> {
    let overrides = env_overrides(env)?;
    let figment = defaults().merge(Toml::file(path));
    extract(apply_overrides(figment, &overrides), None)
}

fn defaults() -> Figment {
    Figment::new().merge(Serialized::defaults(PlugkitConfig::default()))
}

fn extract(figment: Figment, inline: Option<&str>) -> Result<PlugkitConfig, Vec<ConfigError>> {
    figment
        .extract()
        .map_err(|err| diagnostic::figment_to_config_errors(err, inline))
}

fn apply_overrides(figment: Figment, overrides: &[EnvOverride]) -> Figment {
    overrides.iter().fold(figment, |figment, o| {
        tracing::debug!(var = %o.var, key = o.key, "config override from environment");
        figment.merge(Serialized::default(o.key, &o.value))
    })
}

/// Collect the overrides `env` supplies, legacy variables first.
///
/// A `PLUGKIT_*` variable inside a known section that names no field, or a
/// value of the wrong type, is an error naming the variable. Variables outside
/// the known sections are ignored.
pub fn env_overrides(env: &dyn EnvProvider) -> Result<Vec<EnvOverride>, Vec<ConfigError>> {
    let mut overrides = Vec::new();
    let mut errors = Vec::new();

    for (var, key) in [
        (TMP_DIR_VAR, "workspace.tmp_dir"),
        (PRIVATE_KEY_VAR, "secrets.private_key_path"),
    ] {
        if let Some(raw) = env.var(var) {
            overrides.push(EnvOverride {
                var: var.to_string(),
                key,
                value: OverrideValue::Text(raw),
            });
        }
    }

    for (var, raw) in env.vars_with_prefix(ENV_PREFIX) {
        let Some((key, kind)) = field_for_var(&var) else {
            if in_known_section(&var) {
                let known: Vec<String> = FIELDS.iter().map(|(k, _)| env_var_name(k)).collect();
                errors.push(ConfigError::UnknownEnvVar {
                    suggestion: diagnostic::suggest_key(&var, known.as_slice()),
                    var,
                });
            } else {
                tracing::debug!(var = %var, "ignoring env var outside known config sections");
            }
            continue;
        };
        match kind.parse(&raw) {
            Some(value) => overrides.push(EnvOverride { var, key, value }),
            None => errors.push(ConfigError::InvalidEnvValue {
                var,
                value: raw,
                expected: kind.expected().to_string(),
            }),
        }
    }

    if errors.is_empty() { Ok(overrides) } else { Err(errors) }
}

/// The variable that overrides a dotted key: `workspace.tmp_dir` is
/// `PLUGKIT_WORKSPACE_TMP_DIR`.
pub fn env_var_name(key: &str) -> String {
    format!("{ENV_PREFIX}{}", key.replace('.', "_").to_ascii_uppercase())
}

/// Map a prefixed env var name to a dotted config path.
///
/// Names are matched against the known fields rather than split on `_`,
/// because field names contain underscores: `PLUGKIT_SECRETS_PRIVATE_KEY_PATH`
/// maps to `secrets.private_key_path`.
pub fn env_key_to_path(var_name: &str) -> Option<&'static str> {
    field_for_var(var_name).map(|(key, _)| key)
}

fn field_for_var(var_name: &str) -> Option<(&'static str, FieldKind)> {
    FIELDS
        .iter()
        .copied()
        .find(|(key, _)| env_var_name(key) == var_name)
}

fn in_known_section(var_name: &str) -> bool {
    let Some(rest) = var_name.strip_prefix(ENV_PREFIX) else {
        return false;
    };
    let rest = rest.to_ascii_lowercase();
    SECTIONS.iter().any(|section| {
        rest.strip_prefix(section)
            .is_some_and(|tail| tail.starts_with('_'))
    })
}
