// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the plugkit configuration system.

use std::path::PathBuf;

use plugkit_config::diagnostic::ConfigError;
use plugkit_config::{
    MapEnv, load_and_validate_str, load_and_validate_with_env, load_config_from_path,
    load_config_from_str, load_config_from_str_with_env,
};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_plugkit_config() {
    let toml = r#"
[workspace]
tmp_dir = "/var/tmp/plugins"
prefix = "it"
keep = true

[process]
session_key = "abc"

[object_storage]
address = "http://127.0.0.1:9000/bucket"

[secrets]
private_key_path = "/keys/test.pem"
key_name = "plugins"

[logging]
level = "debug"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.workspace.tmp_dir, PathBuf::from("/var/tmp/plugins"));
    assert_eq!(config.workspace.prefix, "it");
    assert!(config.workspace.keep);
    assert_eq!(config.process.session_key, "abc");
    assert_eq!(config.object_storage.address, "http://127.0.0.1:9000/bucket");
    assert_eq!(
        config.secrets.private_key_path,
        Some(PathBuf::from("/keys/test.pem"))
    );
    assert_eq!(config.secrets.key_name, "plugins");
    assert_eq!(config.logging.level, "debug");
}

/// Empty TOML yields the defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_and_validate_str("").expect("defaults are valid");
    assert_eq!(config.workspace.tmp_dir, PathBuf::from("/tmp/concord"));
    assert_eq!(config.process.session_key, "xyz");
}

/// A misspelled key is rejected with a suggestion.
#[test]
fn unknown_field_produces_suggestion() {
    let toml = r#"
[workspace]
prefx = "it"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let found = errors.iter().any(|e| match e {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => key == "prefx" && suggestion.as_deref() == Some("prefix"),
        _ => false,
    });
    assert!(found, "expected UnknownKey suggestion, got: {errors:?}");
}

/// Wrong value type is reported as a config error.
#[test]
fn wrong_type_is_rejected() {
    let toml = r#"
[workspace]
keep = "yes please"
"#;
    assert!(load_config_from_str(toml).is_err());
    assert!(load_and_validate_str(toml).is_err());
}

/// Validation failures surface through `load_and_validate_str`.
#[test]
fn invalid_address_fails_validation() {
    let toml = r#"
[object_storage]
address = "localhost:8080"
"#;
    let errors = load_and_validate_str(toml).expect_err("address must be http(s)");
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

/// Legacy variables feed the matching config keys.
#[test]
fn legacy_env_vars_are_honoured() {
    let env = MapEnv::new()
        .with("CONCORD_TMP_DIR", "/tmp/legacy")
        .with("PRIVATE_KEY_PATH", "/keys/legacy.pem");
    let config = load_config_from_str_with_env("", &env).unwrap();
    assert_eq!(config.workspace.tmp_dir, PathBuf::from("/tmp/legacy"));
    assert_eq!(
        config.secrets.private_key_path,
        Some(PathBuf::from("/keys/legacy.pem"))
    );
}

/// `PLUGKIT_*` variables override TOML and legacy variables.
#[test]
fn prefixed_env_vars_override_toml() {
    let toml = r#"
[workspace]
prefix = "from-file"
"#;
    let env = MapEnv::new()
        .with("CONCORD_TMP_DIR", "/tmp/legacy")
        .with("PLUGKIT_WORKSPACE_TMP_DIR", "/tmp/prefixed")
        .with("PLUGKIT_WORKSPACE_PREFIX", "from-env")
        .with("PLUGKIT_WORKSPACE_KEEP", "true")
        .with("PLUGKIT_PROCESS_SESSION_KEY", "s3ss10n");
    let config = load_config_from_str_with_env(toml, &env).unwrap();
    assert_eq!(config.workspace.tmp_dir, PathBuf::from("/tmp/prefixed"));
    assert_eq!(config.workspace.prefix, "from-env");
    assert!(config.workspace.keep);
    assert_eq!(config.process.session_key, "s3ss10n");
}

/// Unrelated variables do not leak into the config.
#[test]
fn unrelated_env_vars_are_ignored() {
    let env = MapEnv::new()
        .with("HOME", "/home/x")
        .with("PLUGKIT_NOT_A_SECTION", "1");
    let config = load_config_from_str_with_env("", &env).unwrap();
    assert_eq!(config.workspace.prefix, "test");
}

/// Loading from a file path merges file contents and env overrides.
#[test]
fn load_from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plugkit.toml");
    std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

    let env = MapEnv::new().with("PLUGKIT_OBJECT_STORAGE_ADDRESS", "https://os.example/b");
    let config = load_config_from_path(&path, &env).unwrap();
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.object_storage.address, "https://os.example/b");
}

/// The env-aware entry point validates too.
#[test]
fn load_and_validate_with_env_rejects_bad_env_values() {
    let env = MapEnv::new().with("PLUGKIT_LOGGING_LEVEL", "chatty");
    let errors = load_and_validate_with_env(&env).expect_err("invalid level");
    assert!(errors.iter().any(|e| e.to_string().contains("logging.level")));
}

/// Digit-only values for string settings stay strings.
#[test]
fn numeric_env_values_override_string_fields() {
    let env = MapEnv::new()
        .with("PLUGKIT_PROCESS_SESSION_KEY", "12345")
        .with("PLUGKIT_WORKSPACE_PREFIX", "2024")
        .with("PLUGKIT_SECRETS_KEY_NAME", "007");
    let config = load_config_from_str_with_env("", &env).unwrap();
    assert_eq!(config.process.session_key, "12345");
    assert_eq!(config.workspace.prefix, "2024");
    assert_eq!(config.secrets.key_name, "007");
}

/// A bad boolean override is reported against the variable that set it.
#[test]
fn invalid_env_flag_names_the_variable() {
    let env = MapEnv::new().with("PLUGKIT_WORKSPACE_KEEP", "perhaps");
    let errors = load_config_from_str_with_env("", &env).expect_err("not a boolean");
    assert!(matches!(
        &errors[..],
        [ConfigError::InvalidEnvValue { var, .. }] if var == "PLUGKIT_WORKSPACE_KEEP"
    ));
    assert!(errors[0].to_string().contains("perhaps"));
}

/// A misspelled override inside a known section is rejected with a suggestion.
#[test]
fn misspelled_env_var_is_rejected() {
    let env = MapEnv::new().with("PLUGKIT_PROCESS_SESION_KEY", "abc");
    let errors = load_and_validate_with_env(&env).expect_err("unknown variable");
    let found = errors.iter().any(|e| match e {
        ConfigError::UnknownEnvVar { var, suggestion } => {
            var == "PLUGKIT_PROCESS_SESION_KEY"
                && suggestion.as_deref() == Some("PLUGKIT_PROCESS_SESSION_KEY")
        }
        _ => false,
    });
    assert!(found, "expected UnknownEnvVar suggestion, got: {errors:?}");
}

/// Unknown keys in a config file carry a span into that file.
#[test]
fn unknown_key_in_file_points_into_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plugkit.toml");
    std::fs::write(&path, "[logging]\nlevel = \"warn\"\nlevl = \"x\"\n").unwrap();

    let errors = load_config_from_path(&path, &MapEnv::new()).expect_err("unknown key");
    let found = errors.iter().any(|e| match e {
        ConfigError::UnknownKey {
            key, span: Some(span), src: Some(_), ..
        } => key == "levl" && span.offset() == "[logging]\nlevel = \"warn\"\n".len(),
        _ => false,
    });
    assert!(found, "expected UnknownKey with span, got: {errors:?}");
}
