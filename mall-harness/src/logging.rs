//! Test logging setup.
//!
//! Call [`init_test_logging`] once per test binary (typically from a
//! `#[ctor::ctor]` function) to get env-filtered tracing output routed
//! through the test writer. Safe to call multiple times.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Default filter when `MALL_E2E_LOG` is unset.
const DEFAULT_FILTER: &str = "info,mall_harness=debug";

/// Install the test tracing subscriber. Initialization happens once;
/// later calls are no-ops.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = std::env::var("MALL_E2E_LOG")
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let result = tracing_subscriber::registry()
            .with(fmt::layer().with_test_writer())
            .with(filter)
            .try_init();

        // Another subscriber may already be installed by the embedding
        // binary; that is fine.
        if let Err(error) = result {
            eprintln!("[mall-harness] test logging not installed: {error}");
        }
    });
}
