//! Logging initialization for the hook.
//!
//! Everything goes to stderr: stdout is reserved for the decision object
//! the CLI reads back.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the hook process.
///
/// The level comes from `RUST_LOG` when set, otherwise from the provided
/// default. Safe to call once per process; a second call is a no-op.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
