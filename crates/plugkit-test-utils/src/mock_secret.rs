// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory secret service.
//!
//! `MockSecretService` answers every key-pair export with one pre-staged key
//! file in the work directory, and serves string secrets from a map that
//! tests populate up front.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex;

use plugkit_core::{InstanceId, KeyPairFiles, PlugkitError, SecretRequest, SecretService};

struct StoredSecret {
    value: SecretString,
    password: Option<SecretString>,
}

pub struct MockSecretService {
    key_files: KeyPairFiles,
    secrets: Arc<Mutex<HashMap<String, StoredSecret>>>,
    exported: Arc<Mutex<Vec<String>>>,
}

impl MockSecretService {
    /// Create a fake whose key exports return `private_key`, a path relative
    /// to the work directory.
    pub fn new(private_key: impl Into<String>) -> Self {
        Self::with_key_files(KeyPairFiles {
            private: private_key.into(),
            public: None,
        })
    }

    pub fn with_key_files(key_files: KeyPairFiles) -> Self {
        Self {
            key_files,
            secrets: Arc::new(Mutex::new(HashMap::new())),
            exported: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The key files returned by every export.
    pub fn key_files(&self) -> &KeyPairFiles {
        &self.key_files
    }

    /// Register a plain string secret.
    pub async fn add_secret(&self, name: impl Into<String>, value: impl Into<String>) {
        self.secrets.lock().await.insert(
            name.into(),
            StoredSecret {
                value: SecretString::from(value.into()),
                password: None,
            },
        );
    }

    /// Register a string secret that requires `password` to export.
    pub async fn add_protected_secret(
        &self,
        name: impl Into<String>,
        value: impl Into<String>,
        password: impl Into<String>,
    ) {
        self.secrets.lock().await.insert(
            name.into(),
            StoredSecret {
                value: SecretString::from(value.into()),
                password: Some(SecretString::from(password.into())),
            },
        );
    }

    /// Names of every secret exported so far, in order.
    pub async fn exported(&self) -> Vec<String> {
        self.exported.lock().await.clone()
    }
}

#[async_trait]
impl SecretService for MockSecretService {
    async fn export_key_as_file(
        &self,
        instance_id: &InstanceId,
        work_dir: &Path,
        request: &SecretRequest,
    ) -> Result<KeyPairFiles, PlugkitError> {
        tracing::debug!(
            %instance_id,
            work_dir = %work_dir.display(),
            secret = %request.name,
            "exporting key pair"
        );
        self.exported.lock().await.push(request.name.clone());
        Ok(self.key_files.clone())
    }

    async fn export_as_string(
        &self,
        instance_id: &InstanceId,
        request: &SecretRequest,
    ) -> Result<SecretString, PlugkitError> {
        let secrets = self.secrets.lock().await;
        let stored = secrets.get(&request.name).ok_or_else(|| PlugkitError::Secret {
            message: format!("secret '{}' not found", request.name),
        })?;

        if let Some(expected) = &stored.password {
            let supplied = request.password.as_ref().map(|p| p.expose_secret());
            if supplied != Some(expected.expose_secret()) {
                return Err(PlugkitError::Secret {
                    message: format!("invalid password for secret '{}'", request.name),
                });
            }
        }

        tracing::debug!(%instance_id, secret = %request.name, "exporting secret string");
        self.exported.lock().await.push(request.name.clone());
        Ok(SecretString::from(stored.value.expose_secret()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn key_export_returns_staged_file() {
        let ss = MockSecretService::new("private123.key");
        let files = ss
            .export_key_as_file(
                &InstanceId::new("p"),
                Path::new("/work"),
                &SecretRequest::new("deploy-key").with_org("Default"),
            )
            .await
            .unwrap();
        assert_eq!(files.private, "private123.key");
        assert_eq!(files.public, None);
        assert_eq!(ss.exported().await, vec!["deploy-key".to_string()]);
    }

    #[tokio::test]
    async fn string_secret_round_trips() {
        let ss = MockSecretService::new("k");
        ss.add_secret("token", "s3cr3t").await;
        let value = ss
            .export_as_string(&InstanceId::new("p"), &SecretRequest::new("token"))
            .await
            .unwrap();
        assert_eq!(value.expose_secret(), "s3cr3t");
    }

    #[tokio::test]
    async fn unknown_secret_fails() {
        let ss = MockSecretService::new("k");
        let err = ss
            .export_as_string(&InstanceId::new("p"), &SecretRequest::new("nope"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[tokio::test]
    async fn protected_secret_requires_password() {
        let ss = MockSecretService::new("k");
        ss.add_protected_secret("db", "pw-value", "open sesame").await;
        let id = InstanceId::new("p");

        assert!(ss.export_as_string(&id, &SecretRequest::new("db")).await.is_err());
        assert!(
            ss.export_as_string(
                &id,
                &SecretRequest::new("db").with_password(SecretString::from("wrong"))
            )
            .await
            .is_err()
        );

        let value = ss
            .export_as_string(
                &id,
                &SecretRequest::new("db").with_password(SecretString::from("open sesame")),
            )
            .await
            .unwrap();
        assert_eq!(value.expose_secret(), "pw-value");
    }
}
