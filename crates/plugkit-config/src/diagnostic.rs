// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config diagnostics rendered through miette.
//!
//! TOML errors point at the offending key in the file (or inline string) it
//! came from; environment errors name the variable. Misspellings get a
//! Jaro-Winkler "did you mean?" suggestion.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::path::Path;

use figment::error::Kind;
use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, NamedSource, SourceSpan};
use plugkit_core::PlugkitError;
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Name shown for TOML passed as a string.
const INLINE_SOURCE: &str = "<inline plugkit.toml>";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A TOML key that no config section defines.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(plugkit::config::unknown_key),
        help("{}", did_you_mean(suggestion.as_deref(), Some(valid_keys)))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a plugkit setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A TOML value of the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(plugkit::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A `PLUGKIT_*` variable in a known section that names no setting.
    #[error("environment variable `{var}` does not name a plugkit setting")]
    #[diagnostic(
        code(plugkit::config::unknown_env_var),
        help("{}", did_you_mean(suggestion.as_deref(), None))
    )]
    UnknownEnvVar {
        var: String,
        suggestion: Option<String>,
    },

    /// An environment value that cannot be read as its setting's type.
    #[error("environment variable `{var}` has invalid value `{value}`")]
    #[diagnostic(code(plugkit::config::invalid_env_value), help("expected {expected}"))]
    InvalidEnvValue {
        var: String,
        value: String,
        expected: String,
    },

    #[error("validation error: {message}")]
    #[diagnostic(code(plugkit::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(plugkit::config::other))]
    Other(String),
}

impl From<ConfigError> for PlugkitError {
    fn from(err: ConfigError) -> Self {
        PlugkitError::Config(err.to_string())
    }
}

fn did_you_mean(suggestion: Option<&str>, valid_keys: Option<&str>) -> String {
    match (suggestion, valid_keys) {
        (Some(s), Some(valid)) => format!("did you mean `{s}`? Valid keys: {valid}"),
        (Some(s), None) => format!("did you mean `{s}`?"),
        (None, Some(valid)) => format!("valid keys: {valid}"),
        (None, None) => "overrides are named PLUGKIT_<SECTION>_<KEY>".to_string(),
    }
}

/// Convert a figment extraction error into diagnostics.
///
/// Unknown keys coming from a file are located by re-reading that file;
/// those coming from a TOML string are located in `inline`.
pub fn figment_to_config_errors(err: figment::Error, inline: Option<&str>) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let (span, src) = match origin_of(&error, inline) {
                    Some((name, content)) => {
                        let span = find_key_offset(&content, &error.path, field)
                            .map(|offset| SourceSpan::new(offset.into(), field.len()));
                        (span, Some(NamedSource::new(name, content)))
                    }
                    None => (None, None),
                };
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, *expected),
                    valid_keys: expected.join(", "),
                    span,
                    src: span.and(src),
                }
            }
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: error.path.join("."),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.to_string(),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// Name and content of the TOML source an error came from.
fn origin_of(error: &figment::Error, inline: Option<&str>) -> Option<(String, String)> {
    let file = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| s.file_path());
    match file {
        Some(path) => read_source(path),
        None => inline.map(|content| (INLINE_SOURCE.to_string(), content.to_string())),
    }
}

fn read_source(path: &Path) -> Option<(String, String)> {
    let content = std::fs::read_to_string(path).ok()?;
    Some((path.display().to_string(), content))
}

/// Byte offset of `field` as a key inside the table named by `path`.
///
/// Only lines under the matching `[table]` header are considered; an empty
/// path means top-level keys before the first header.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let wanted_table = path.first().map(String::as_str);
    let mut table: Option<&str> = None;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        let trimmed = line.trim();

        if let Some(header) = trimmed.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
            table = Some(header.trim());
            continue;
        }
        if table != wanted_table {
            continue;
        }
        let Some((key, _)) = trimmed.split_once('=') else {
            continue;
        };
        if key.trim() == field {
            let indent = line.len() - line.trim_start().len();
            return Some(start + indent);
        }
    }
    None
}

/// The candidate closest to `unknown`, if any is similar enough.
pub fn suggest_key<S: AsRef<str>>(unknown: &str, candidates: &[S]) -> Option<String> {
    candidates
        .iter()
        .map(|c| (strsim::jaro_winkler(unknown, c.as_ref()), c.as_ref()))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, c)| c.to_string())
}

/// Render `ConfigError`s with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) -> String {
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    let mut out = String::new();
    for error in errors {
        if handler.render_report(&mut out, error).is_err() {
            out.push_str(&format!("Error: {error}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_closest_field() {
        assert_eq!(
            suggest_key("prefx", &["tmp_dir", "prefix", "keep"]),
            Some("prefix".to_string())
        );
        assert_eq!(
            suggest_key("session_kye", &["session_key"]),
            Some("session_key".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        assert_eq!(suggest_key("zzzzzz", &["tmp_dir", "prefix", "keep"]), None);
    }

    #[test]
    fn key_offset_respects_table() {
        let content = "[process]\nprefix = \"no\"\n\n[workspace]\n  prefx = \"it\"\n";
        let path = vec!["workspace".to_string()];
        let o = find_key_offset(content, &path, "prefx").unwrap();
        assert_eq!(&content[o..o + 5], "prefx");
        assert_eq!(find_key_offset(content, &path, "prefix"), None);
    }

    #[test]
    fn top_level_key_offset() {
        let content = "stray = 1\n[workspace]\nstray = 2\n";
        assert_eq!(find_key_offset(content, &[], "stray"), Some(0));
    }

    #[test]
    fn config_error_converts_to_plugkit_error() {
        let err: PlugkitError = ConfigError::Validation {
            message: "bad".into(),
        }
        .into();
        assert!(matches!(err, PlugkitError::Config(m) if m.contains("bad")));
    }

    #[test]
    fn env_errors_render_with_variable_and_help() {
        let rendered = render_errors(&[
            ConfigError::InvalidEnvValue {
                var: "PLUGKIT_WORKSPACE_KEEP".into(),
                value: "maybe".into(),
                expected: "a boolean".into(),
            },
            ConfigError::UnknownEnvVar {
                var: "PLUGKIT_LOGGING_LEVLE".into(),
                suggestion: Some("PLUGKIT_LOGGING_LEVEL".into()),
            },
        ]);
        assert!(rendered.contains("PLUGKIT_WORKSPACE_KEEP"));
        assert!(rendered.contains("expected a boolean"));
        assert!(rendered.contains("did you mean `PLUGKIT_LOGGING_LEVEL`?"));
    }
}
