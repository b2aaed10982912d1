//! Logging setup for hosts embedding the scanner.
//!
//! The scanner only emits `tracing` events; installing a subscriber is the
//! host's call. These helpers give the usual `RUST_LOG`-driven setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing with phrasematch defaults (`info`).
pub fn init() {
    init_with_filter("info");
}

/// Initialize tracing with a custom default filter.
///
/// `RUST_LOG` wins when set. Later calls are no-ops once a global subscriber
/// is installed.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

/// Log prefixes for scan lifecycle events.
pub mod prefix {
    /// Scan started
    pub const SCAN: &str = "⌕";
    /// Scan finished with a result
    pub const SCAN_DONE: &str = "✓";
    /// Scan cancelled or timed out
    pub const SCAN_CANCEL: &str = "⊘";
}
