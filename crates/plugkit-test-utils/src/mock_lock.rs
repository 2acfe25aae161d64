// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory lock service.
//!
//! `MockLockService` implements `LockService` with real exclusion semantics
//! between process instances and records every call for assertions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use plugkit_core::{InstanceId, LockService, PlugkitError};

/// A call made against the mock lock service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockCall {
    Lock {
        instance_id: InstanceId,
        lock_name: String,
    },
    Unlock {
        instance_id: InstanceId,
        lock_name: String,
    },
}

/// A lock service backed by an in-memory table of held locks.
///
/// A lock held by one instance cannot be taken by another until released.
/// Re-locking by the holder is a no-op.
pub struct MockLockService {
    held: Arc<Mutex<HashMap<String, InstanceId>>>,
    calls: Arc<Mutex<Vec<LockCall>>>,
}

impl MockLockService {
    pub fn new() -> Self {
        Self {
            held: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The instance currently holding `lock_name`, if any.
    pub async fn holder(&self, lock_name: &str) -> Option<InstanceId> {
        self.held.lock().await.get(lock_name).cloned()
    }

    /// Every call made so far, in order.
    pub async fn calls(&self) -> Vec<LockCall> {
        self.calls.lock().await.clone()
    }

    /// Number of locks currently held.
    pub async fn held_count(&self) -> usize {
        self.held.lock().await.len()
    }
}

impl Default for MockLockService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LockService for MockLockService {
    async fn project_lock(
        &self,
        instance_id: &InstanceId,
        lock_name: &str,
    ) -> Result<(), PlugkitError> {
        self.calls.lock().await.push(LockCall::Lock {
            instance_id: instance_id.clone(),
            lock_name: lock_name.to_string(),
        });

        let mut held = self.held.lock().await;
        match held.get(lock_name) {
            Some(holder) if holder != instance_id => Err(PlugkitError::Lock {
                message: format!("lock '{lock_name}' is held by {holder}"),
            }),
            Some(_) => Ok(()),
            None => {
                tracing::debug!(%instance_id, lock_name, "lock acquired");
                held.insert(lock_name.to_string(), instance_id.clone());
                Ok(())
            }
        }
    }

    async fn project_unlock(
        &self,
        instance_id: &InstanceId,
        lock_name: &str,
    ) -> Result<(), PlugkitError> {
        self.calls.lock().await.push(LockCall::Unlock {
            instance_id: instance_id.clone(),
            lock_name: lock_name.to_string(),
        });

        let mut held = self.held.lock().await;
        match held.get(lock_name) {
            Some(holder) if holder == instance_id => {
                held.remove(lock_name);
                tracing::debug!(%instance_id, lock_name, "lock released");
                Ok(())
            }
            _ => Err(PlugkitError::Lock {
                message: format!("lock '{lock_name}' is not held by {instance_id}"),
            }),
        }
    }
}
