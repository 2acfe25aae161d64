// SPDX-FileCopyrightText: 2026 Plugkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracing setup for tests.

use tracing_subscriber::EnvFilter;

/// Installs a test-writer tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Safe to call from every test;
/// only the first call installs a subscriber.
pub fn init_test_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("plugkit={level},warn")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(true)
        .with_thread_names(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_test_tracing("debug");
        init_test_tracing("trace");
        tracing::debug!("still logging");
    }
}
