// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dependency resolution.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::PlugkitError;

/// Resolves dependency URIs (e.g. `file:///opt/lib.jar`,
/// `mvn://com.example:tool:1.0`) to files on local disk.
#[async_trait]
pub trait DependencyManager: Send + Sync + 'static {
    /// Resolves one URI to a local path.
    async fn resolve(&self, uri: &str) -> Result<PathBuf, PlugkitError>;

    /// Resolves each URI in order, stopping at the first failure.
    async fn resolve_all(&self, uris: &[&str]) -> Result<Vec<PathBuf>, PlugkitError> {
        let mut paths = Vec::with_capacity(uris.len());
        for uri in uris {
            paths.push(self.resolve(uri).await?);
        }
        Ok(paths)
    }
}
