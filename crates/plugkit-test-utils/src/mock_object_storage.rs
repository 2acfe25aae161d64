// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory object storage.
//!
//! Every bucket resolves to the same configured address, so a test can point
//! a plugin at one local endpoint regardless of which bucket it asks for.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use plugkit_core::{BucketInfo, InstanceId, ObjectStorage, PlugkitError};

pub struct MockObjectStorage {
    address: String,
    created: Arc<Mutex<Vec<(InstanceId, String)>>>,
}

impl MockObjectStorage {
    /// Create a fake returning `address` for every bucket.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            created: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Buckets created so far, as `(instance, name)` pairs.
    pub async fn created_buckets(&self) -> Vec<(InstanceId, String)> {
        self.created.lock().await.clone()
    }
}

#[async_trait]
impl ObjectStorage for MockObjectStorage {
    async fn create_bucket(
        &self,
        instance_id: &InstanceId,
        name: &str,
    ) -> Result<BucketInfo, PlugkitError> {
        if name.trim().is_empty() {
            return Err(PlugkitError::Storage {
                message: "bucket name must not be empty".to_string(),
            });
        }
        self.created
            .lock()
            .await
            .push((instance_id.clone(), name.to_string()));
        tracing::debug!(%instance_id, bucket = name, address = %self.address, "bucket created");
        Ok(BucketInfo {
            address: self.address.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_bucket_gets_the_configured_address() {
        let os = MockObjectStorage::new("http://localhost:1234/test");
        let id = InstanceId::new("p1");
        let a = os.create_bucket(&id, "a").await.unwrap();
        let b = os.create_bucket(&id, "b").await.unwrap();
        assert_eq!(a.address, "http://localhost:1234/test");
        assert_eq!(a, b);
        assert_eq!(
            os.created_buckets().await,
            vec![(id.clone(), "a".to_string()), (id, "b".to_string())]
        );
    }

    #[tokio::test]
    async fn empty_bucket_name_is_rejected() {
        let os = MockObjectStorage::new("http://localhost/test");
        let err = os.create_bucket(&InstanceId::new("p"), " ").await.unwrap_err();
        assert!(matches!(err, PlugkitError::Storage { .. }));
        assert!(os.created_buckets().await.is_empty());
    }
}
