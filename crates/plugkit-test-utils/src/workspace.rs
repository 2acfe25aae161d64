// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Isolated per-test work directories.

use std::fs;
use std::path::{Path, PathBuf};

use plugkit_config::model::WorkspaceConfig;
use plugkit_core::PlugkitError;
use tempfile::TempDir;

enum Dir {
    Temp(TempDir),
    Kept(PathBuf),
}

/// A work directory created under the configured tmp base.
///
/// Removed on drop unless the config asks to keep it or [`Workspace::keep`]
/// is called.
pub struct Workspace {
    dir: Dir,
    basedir: PathBuf,
}

impl Workspace {
    /// Create a fresh work directory. `basedir` anchors [`Workspace::target`] paths.
    pub fn create(config: &WorkspaceConfig, basedir: impl Into<PathBuf>) -> Result<Self, PlugkitError> {
        fs::create_dir_all(&config.tmp_dir)?;
        let temp = tempfile::Builder::new()
            .prefix(&config.prefix)
            .tempdir_in(&config.tmp_dir)?;

        let dir = if config.keep {
            Dir::Kept(temp.keep())
        } else {
            Dir::Temp(temp)
        };
        let workspace = Self {
            dir,
            basedir: basedir.into(),
        };
        tracing::debug!(work_dir = %workspace.path().display(), keep = config.keep, "workspace created");
        Ok(workspace)
    }

    pub fn path(&self) -> &Path {
        match &self.dir {
            Dir::Temp(t) => t.path(),
            Dir::Kept(p) => p,
        }
    }

    /// Absolute path of the work directory.
    pub fn absolute_path(&self) -> Result<PathBuf, PlugkitError> {
        Ok(std::path::absolute(self.path())?)
    }

    pub fn basedir(&self) -> &Path {
        &self.basedir
    }

    /// Path of `name` inside the work directory.
    pub fn resolve(&self, name: impl AsRef<Path>) -> PathBuf {
        self.path().join(name)
    }

    /// Write `content` to `name` inside the work directory, creating parent
    /// directories as needed.
    pub fn write_file(
        &self,
        name: impl AsRef<Path>,
        content: impl AsRef<[u8]>,
    ) -> Result<PathBuf, PlugkitError> {
        let path = self.resolve(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// A path under `<basedir>/target/` whose parent directory exists.
    pub fn target(&self, name: impl AsRef<Path>) -> Result<PathBuf, PlugkitError> {
        let target = self.basedir.join("target").join(name);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(target)
    }

    /// Persist the directory past drop and return its path.
    pub fn keep(self) -> PathBuf {
        match self.dir {
            Dir::Temp(t) => t.keep(),
            Dir::Kept(p) => p,
        }
    }
}

/// Recursively delete `path`. A missing path is not an error.
pub fn delete_directory(path: &Path) -> Result<(), PlugkitError> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
