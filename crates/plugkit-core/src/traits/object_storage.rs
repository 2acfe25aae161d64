// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object storage service.

use async_trait::async_trait;

use crate::error::PlugkitError;
use crate::types::{BucketInfo, InstanceId};

/// Creates buckets that a process can store objects in.
#[async_trait]
pub trait ObjectStorage: Send + Sync + 'static {
    /// Creates (or reuses) a bucket named `name` for the given process.
    async fn create_bucket(
        &self,
        instance_id: &InstanceId,
        name: &str,
    ) -> Result<BucketInfo, PlugkitError>;
}
