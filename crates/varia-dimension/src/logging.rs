//! Tracing setup shared by binaries and tests.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the global tracing subscriber once.
///
/// Filtering follows `RUST_LOG` (default `info`). Safe to call repeatedly —
/// later calls are no-ops, so tests can call it unconditionally.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
