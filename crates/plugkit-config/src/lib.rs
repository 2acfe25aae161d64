// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for plugkit test harnesses.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment overrides read through an injectable
//! [`EnvProvider`], and miette diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use plugkit_config::{MapEnv, load_and_validate_with_env};
//!
//! let env = MapEnv::new().with("CONCORD_TMP_DIR", "/tmp/it");
//! let config = load_and_validate_with_env(&env).expect("config errors");
//! assert_eq!(config.workspace.tmp_dir, std::path::PathBuf::from("/tmp/it"));
//! ```

pub mod diagnostic;
pub mod env;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use env::{EnvProvider, MapEnv, ProcessEnv};
pub use loader::{
    EnvOverride, OverrideValue, env_overrides, load_config, load_config_from_path,
    load_config_from_str, load_config_from_str_with_env, load_config_with_env,
};
pub use model::PlugkitConfig;

/// Load configuration from the XDG hierarchy and the process environment, then validate it.
pub fn load_and_validate() -> Result<PlugkitConfig, Vec<ConfigError>> {
    load_and_validate_with_env(&ProcessEnv)
}

/// Load configuration reading environment overrides from `env`, then validate it.
pub fn load_and_validate_with_env(
    env: &dyn EnvProvider,
) -> Result<PlugkitConfig, Vec<ConfigError>> {
    validated(loader::load_config_with_env(env)?)
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<PlugkitConfig, Vec<ConfigError>> {
    validated(loader::load_config_from_str(toml_content)?)
}

fn validated(config: PlugkitConfig) -> Result<PlugkitConfig, Vec<ConfigError>> {
    validation::validate_config(&config)?;
    Ok(config)
}
