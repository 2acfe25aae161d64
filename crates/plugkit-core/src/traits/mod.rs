// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform service traits a plugin depends on.
//!
//! Tests substitute in-memory fakes for these; all traits use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod dependency;
pub mod lock;
pub mod object_storage;
pub mod secret;

pub use dependency::DependencyManager;
pub use lock::LockService;
pub use object_storage::ObjectStorage;
pub use secret::SecretService;
