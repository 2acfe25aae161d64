// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Well-known context variable names.

/// Process metadata object (`{"sessionKey": ...}`).
pub const PROCESS_INFO_KEY: &str = "processInfo";

/// Absolute path of the process working directory.
pub const WORK_DIR_KEY: &str = "workDir";

/// Session key entry inside [`PROCESS_INFO_KEY`].
pub const SESSION_KEY: &str = "sessionKey";
