// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Value types exchanged with platform service traits.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Identifier of a running process instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub String);

impl InstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bucket created through the object storage service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketInfo {
    /// Address the bucket contents are reachable at.
    pub address: String,
}

/// Files produced when exporting a key pair.
///
/// Paths are relative to the process work directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPairFiles {
    pub private: String,
    pub public: Option<String>,
}

/// Identifies a stored secret.
#[derive(Debug)]
pub struct SecretRequest {
    pub org_name: Option<String>,
    pub name: String,
    pub password: Option<SecretString>,
}

impl SecretRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            org_name: None,
            name: name.into(),
            password: None,
        }
    }

    pub fn with_org(mut self, org_name: impl Into<String>) -> Self {
        self.org_name = Some(org_name.into());
        self
    }

    pub fn with_password(mut self, password: SecretString) -> Self {
        self.password = Some(password);
        self
    }
}
