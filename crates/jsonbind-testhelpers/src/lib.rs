//! Test setup shared by the jsonbind crates.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a test-writer tracing subscriber once per test binary.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`, so tests that
/// exercise best-effort paths show their diagnostics under `--nocapture`.
pub fn setup() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
