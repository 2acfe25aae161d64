// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for workflow plugin tests.
//!
//! Provides in-memory service fakes and a harness that prepares an isolated
//! work directory and interpolating mock contexts, so plugin tests run fast
//! and deterministically without platform services.
//!
//! # Components
//!
//! - [`TestSupport`] - Harness with work directory, fakes, and context factory
//! - [`MockLockService`] - Lock service with exclusion between instances
//! - [`MockObjectStorage`] - Object storage returning one configured address
//! - [`MockDependencyManager`] - Dependency manager serving local and pre-registered artifacts
//! - [`MockSecretService`] - Secret service serving a staged key file and string secrets
//! - [`Workspace`] - Self-cleaning temporary work directory

pub mod harness;
pub mod logging;
pub mod mock_dependency;
pub mod mock_lock;
pub mod mock_object_storage;
pub mod mock_secret;
pub mod workspace;

pub use harness::{TestSupport, TestSupportBuilder};
pub use logging::init_test_tracing;
pub use mock_dependency::MockDependencyManager;
pub use mock_lock::{LockCall, MockLockService};
pub use mock_object_storage::MockObjectStorage;
pub use mock_secret::MockSecretService;
pub use workspace::Workspace;
