// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for plugkit.
//!
//! Provides the variable [`Namespace`], `${name}` [`interpolate`](interpolate::interpolate)
//! substitution, the [`Context`] surface with its [`InterpolatingMockContext`]
//! implementation, and the platform service traits that test fakes implement.

pub mod context;
pub mod error;
pub mod interpolate;
pub mod keys;
pub mod namespace;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use context::{Context, InterpolatingMockContext};
pub use error::PlugkitError;
pub use namespace::{Namespace, value_to_text};
pub use types::{BucketInfo, InstanceId, KeyPairFiles, SecretRequest};

pub use traits::{DependencyManager, LockService, ObjectStorage, SecretService};
