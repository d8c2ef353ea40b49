//! Tracing subscriber setup.
//!
//! The library only emits `tracing` events; binaries and tests decide
//! where they go.

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor an explicit level is set.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a global fmt subscriber writing to stderr.
///
/// `level` wins over `RUST_LOG`; an unparsable level falls back to
/// [`DEFAULT_FILTER`]. Calling twice is a no-op.
///
/// # Example
/// ```no_run
/// u_judging::logging::init(Some("u_judging=debug"));
/// ```
pub fn init(level: Option<&str>) {
    let _ = fmt()
        .with_env_filter(filter_for(level))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

/// Explicit level, else `RUST_LOG`, else [`DEFAULT_FILTER`].
pub fn filter_for(level: Option<&str>) -> EnvFilter {
    let parsed = match level {
        Some(level) => EnvFilter::try_new(level).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    };
    parsed.unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a debug-level subscriber that writes through the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
