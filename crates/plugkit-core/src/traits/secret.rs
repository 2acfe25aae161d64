// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret service trait.

use std::path::Path;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::PlugkitError;
use crate::types::{InstanceId, KeyPairFiles, SecretRequest};

/// Exposes stored secrets to a running process.
#[async_trait]
pub trait SecretService: Send + Sync + 'static {
    /// Writes a key pair into `work_dir` and returns the file paths relative to it.
    async fn export_key_as_file(
        &self,
        instance_id: &InstanceId,
        work_dir: &Path,
        request: &SecretRequest,
    ) -> Result<KeyPairFiles, PlugkitError>;

    /// Returns a plain-text secret.
    async fn export_as_string(
        &self,
        instance_id: &InstanceId,
        request: &SecretRequest,
    ) -> Result<SecretString, PlugkitError>;
}
