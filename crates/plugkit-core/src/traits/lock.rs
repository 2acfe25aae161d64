// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project-scoped lock service.

use async_trait::async_trait;

use crate::error::PlugkitError;
use crate::types::InstanceId;

/// Named locks shared by all processes of a project.
#[async_trait]
pub trait LockService: Send + Sync + 'static {
    /// Acquires `lock_name` on behalf of `instance_id`.
    async fn project_lock(&self, instance_id: &InstanceId, lock_name: &str)
        -> Result<(), PlugkitError>;

    /// Releases `lock_name` held by `instance_id`.
    async fn project_unlock(
        &self,
        instance_id: &InstanceId,
        lock_name: &str,
    ) -> Result<(), PlugkitError>;
}
