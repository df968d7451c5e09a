//! Tracing/logging initialization.
//!
//! The filter comes from `RUST_LOG` and defaults to `info`. The collections
//! only emit at `trace`/`debug`, so set e.g.
//! `RUST_LOG=ddd_blocks_collections=trace` to see inserts and removals.

use tracing_subscriber::EnvFilter;

/// Default directive when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    // JSON logs + timestamps, configurable via RUST_LOG.
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init()
        .is_ok();
    if installed {
        ::tracing::debug!(format = "json", "tracing initialized");
    }
}

/// Initialize tracing with the test writer so output is captured per test.
pub fn init_for_tests() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_test_writer()
        .try_init()
        .is_ok();
    if installed {
        ::tracing::debug!(format = "test", "tracing initialized");
    }
}
