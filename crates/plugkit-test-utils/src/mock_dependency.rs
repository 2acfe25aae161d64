// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline dependency manager.
//!
//! `file://` URIs resolve to the named file. Any other URI must be registered
//! up front, either pointing at an existing file or with content that is
//! written under `<root>/dependencies/`. Nothing is downloaded.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use plugkit_core::{DependencyManager, PlugkitError};

const FILE_SCHEME: &str = "file://";

/// Directory under the root that registered artifact content is written to.
pub const ARTIFACT_DIR: &str = "dependencies";

pub struct MockDependencyManager {
    root: PathBuf,
    artifacts: Arc<Mutex<BTreeMap<String, PathBuf>>>,
    lookups: Arc<Mutex<Vec<String>>>,
}

impl MockDependencyManager {
    /// Create a fake that stores artifact content under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            artifacts: Arc::new(Mutex::new(BTreeMap::new())),
            lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Serve `uri` from an existing file. Relative paths are taken from the root.
    pub async fn register(
        &self,
        uri: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<PathBuf, PlugkitError> {
        let path = self.root.join(path);
        if !path.is_file() {
            return Err(PlugkitError::Dependency {
                message: format!("artifact file {} does not exist", path.display()),
            });
        }
        self.artifacts.lock().await.insert(uri.into(), path.clone());
        Ok(path)
    }

    /// Write `content` to `<root>/dependencies/<file_name>` and serve `uri` from it.
    pub async fn add_artifact(
        &self,
        uri: impl Into<String>,
        file_name: &str,
        content: impl AsRef<[u8]>,
    ) -> Result<PathBuf, PlugkitError> {
        let dir = self.root.join(ARTIFACT_DIR);
        fs::create_dir_all(&dir)?;
        let path = dir.join(file_name);
        fs::write(&path, content)?;
        self.artifacts.lock().await.insert(uri.into(), path.clone());
        Ok(path)
    }

    /// Every URI passed to `resolve`, in call order, including failed lookups.
    pub async fn lookups(&self) -> Vec<String> {
        self.lookups.lock().await.clone()
    }
}

#[async_trait]
impl DependencyManager for MockDependencyManager {
    async fn resolve(&self, uri: &str) -> Result<PathBuf, PlugkitError> {
        self.lookups.lock().await.push(uri.to_string());

        let path = match uri.strip_prefix(FILE_SCHEME) {
            Some(local) => PathBuf::from(local),
            None => self
                .artifacts
                .lock()
                .await
                .get(uri)
                .cloned()
                .ok_or_else(|| PlugkitError::Dependency {
                    message: format!("no artifact registered for {uri}"),
                })?,
        };

        if !path.is_file() {
            return Err(PlugkitError::Dependency {
                message: format!("{uri} resolves to missing file {}", path.display()),
            });
        }
        tracing::debug!(uri, path = %path.display(), "dependency resolved");
        Ok(path)
    }
}
