// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for plugin tests.
//!
//! `TestSupport` assembles an isolated work directory, in-memory service
//! fakes, and a context factory seeded with the variables every plugin
//! expects. Environment variables are read through an injected
//! [`EnvProvider`]; the process environment is never modified.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use plugkit_config::validation::validate_config;
use plugkit_config::{EnvProvider, PlugkitConfig, ProcessEnv, render_errors};
use plugkit_core::keys::{PROCESS_INFO_KEY, SESSION_KEY, WORK_DIR_KEY};
use plugkit_core::{InstanceId, InterpolatingMockContext, Namespace, PlugkitError};
use serde_json::{Value, json};

use crate::logging::init_test_tracing;
use crate::mock_dependency::MockDependencyManager;
use crate::mock_lock::MockLockService;
use crate::mock_object_storage::MockObjectStorage;
use crate::mock_secret::MockSecretService;
use crate::workspace::{self, Workspace};

/// Builder for creating test environments with configurable options.
pub struct TestSupportBuilder {
    config: Option<PlugkitConfig>,
    env: Box<dyn EnvProvider>,
    basedir: Option<PathBuf>,
    secrets: Vec<(String, String)>,
}

impl TestSupportBuilder {
    fn new() -> Self {
        Self {
            config: None,
            env: Box::new(ProcessEnv),
            basedir: None,
            secrets: Vec::new(),
        }
    }

    /// Use an explicit configuration instead of loading one.
    pub fn with_config(mut self, config: PlugkitConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Read environment overrides from `env` when loading configuration.
    ///
    /// Ignored when an explicit config is supplied.
    pub fn with_env(mut self, env: impl EnvProvider + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Anchor `target()` paths somewhere other than the current directory.
    pub fn with_basedir(mut self, basedir: impl Into<PathBuf>) -> Self {
        self.basedir = Some(basedir.into());
        self
    }

    /// Pre-register a string secret with the secret service fake.
    pub fn with_secret(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.push((name.into(), value.into()));
        self
    }

    /// Build the harness, creating the work directory and all service fakes.
    pub async fn build(self) -> Result<TestSupport, PlugkitError> {
        let config = match self.config {
            Some(config) => {
                validate_config(&config).map_err(|errors| config_error(&errors))?;
                config
            }
            None => plugkit_config::load_and_validate_with_env(self.env.as_ref())
                .map_err(|errors| config_error(&errors))?,
        };
        init_test_tracing(&config.logging.level);

        let basedir = match self.basedir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };

        let workspace = Workspace::create(&config.workspace, basedir)?;
        let instance_id = InstanceId::new(uuid::Uuid::new_v4().to_string());

        let dependency_manager = Arc::new(MockDependencyManager::new(workspace.absolute_path()?));
        let lock_service = Arc::new(MockLockService::new());
        let object_storage = Arc::new(MockObjectStorage::new(&config.object_storage.address));
        let secret_service = Arc::new(create_secret_service(&workspace, &config)?);
        for (name, value) in self.secrets {
            secret_service.add_secret(name, value).await;
        }

        tracing::info!(
            %instance_id,
            work_dir = %workspace.path().display(),
            "test support ready"
        );
        if let Ok(rendered) = config.to_toml() {
            tracing::trace!(config = %rendered, "effective configuration");
        }

        Ok(TestSupport {
            instance_id,
            dependency_manager,
            lock_service,
            object_storage,
            secret_service,
            config,
            workspace,
        })
    }
}

fn config_error(errors: &[plugkit_config::ConfigError]) -> PlugkitError {
    PlugkitError::Config(render_errors(errors))
}

/// Stage the private key file answered by every key export.
///
/// A `private*.key` file is always created in the work directory; it holds a
/// copy of the configured private key when one is available and is empty
/// otherwise.
fn create_secret_service(
    workspace: &Workspace,
    config: &PlugkitConfig,
) -> Result<MockSecretService, PlugkitError> {
    let staged = tempfile::Builder::new()
        .prefix("private")
        .suffix(".key")
        .tempfile_in(workspace.path())?;
    let (_, dst) = staged.keep().map_err(|e| PlugkitError::Io { source: e.error })?;

    if let Some(src) = config.secrets.resolve_private_key() {
        fs::copy(&src, &dst)?;
        tracing::debug!(src = %src.display(), "private key staged");
    } else {
        tracing::debug!("no private key configured, staged an empty key file");
    }

    let relative = dst
        .strip_prefix(workspace.path())
        .map_err(|e| PlugkitError::Internal(format!("staged key outside work dir: {e}")))?;
    Ok(MockSecretService::new(relative.to_string_lossy()))
}

/// A complete plugin test environment.
///
/// The work directory lives as long as the harness (unless configured to be
/// kept). Service fakes are shared `Arc`s so they can be handed to the code
/// under test and inspected afterwards.
pub struct TestSupport {
    /// Identifier used for the simulated process instance.
    pub instance_id: InstanceId,
    /// The dependency manager fake, rooted at the work directory.
    pub dependency_manager: Arc<MockDependencyManager>,
    /// The lock service fake.
    pub lock_service: Arc<MockLockService>,
    /// The object storage fake.
    pub object_storage: Arc<MockObjectStorage>,
    /// The secret service fake.
    pub secret_service: Arc<MockSecretService>,
    /// Effective configuration.
    pub config: PlugkitConfig,
    workspace: Workspace,
}

impl TestSupport {
    /// Create a new builder for configuring the harness.
    pub fn builder() -> TestSupportBuilder {
        TestSupportBuilder::new()
    }

    pub fn work_dir(&self) -> &Path {
        self.workspace.path()
    }

    pub fn basedir(&self) -> &Path {
        self.workspace.basedir()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// A context holding only the required process variables.
    pub fn context(&self) -> Result<InterpolatingMockContext, PlugkitError> {
        self.context_with(std::iter::empty::<(String, Value)>())
    }

    /// A context holding the required process variables overlaid with `variables`.
    pub fn context_with<I, K>(&self, variables: I) -> Result<InterpolatingMockContext, PlugkitError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let namespace = self.required_context_variables()?;
        namespace.extend(variables);
        Ok(InterpolatingMockContext::new(namespace))
    }

    /// A context over the caller's namespace.
    ///
    /// Required variables are added only where the namespace does not already
    /// define them, and the namespace is shared rather than copied.
    pub fn context_in(&self, namespace: &Namespace) -> Result<InterpolatingMockContext, PlugkitError> {
        for (key, value) in self.required_context_variables()?.snapshot() {
            if !namespace.contains_key(&key) {
                namespace.insert(key, value);
            }
        }
        Ok(InterpolatingMockContext::new(namespace.clone()))
    }

    fn required_context_variables(&self) -> Result<Namespace, PlugkitError> {
        let work_dir = self.workspace.absolute_path()?;
        let namespace = Namespace::new();
        namespace.insert(
            PROCESS_INFO_KEY,
            json!({ SESSION_KEY: self.config.process.session_key }),
        );
        namespace.insert(WORK_DIR_KEY, work_dir.to_string_lossy().into_owned());
        Ok(namespace)
    }

    /// Write a file into the work directory.
    pub fn write_file_to_workspace(
        &self,
        name: impl AsRef<Path>,
        content: impl AsRef<[u8]>,
    ) -> Result<PathBuf, PlugkitError> {
        self.workspace.write_file(name, content)
    }

    /// A path under `<basedir>/target/` whose parent directory exists.
    pub fn target(&self, name: impl AsRef<Path>) -> Result<PathBuf, PlugkitError> {
        self.workspace.target(name)
    }

    /// Recursively delete a directory.
    pub fn delete_directory(&self, path: &Path) -> Result<(), PlugkitError> {
        workspace::delete_directory(path)
    }
}
