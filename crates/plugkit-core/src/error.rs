// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for plugkit.

use thiserror::Error;

/// The primary error type used across plugkit contexts, services, and harnesses.
#[derive(Debug, Error)]
pub enum PlugkitError {
    /// The value handed to an instance `interpolate` call had no textual form.
    #[error("cannot interpolate a null value")]
    NullInput,

    /// A namespace key maps to a null value at interpolation time.
    #[error("The value of the key '{key}' is null.")]
    NullValue { key: String },

    /// Configuration errors (invalid TOML, failed validation).
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors while preparing or using a test workspace.
    #[error("io error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Lock service errors (lock held by another instance, unlock without lock).
    #[error("lock error: {message}")]
    Lock { message: String },

    /// Object storage errors.
    #[error("object storage error: {message}")]
    Storage { message: String },

    /// Secret service errors (unknown secret, export failure).
    #[error("secret error: {message}")]
    Secret { message: String },

    /// Dependency resolution errors (unknown artifact, missing file).
    #[error("dependency error: {message}")]
    Dependency { message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PlugkitError {
    /// Returns the offending key when this is a [`PlugkitError::NullValue`].
    pub fn null_key(&self) -> Option<&str> {
        match self {
            Self::NullValue { key } => Some(key),
            _ => None,
        }
    }
}
