//! Tracing setup for test suites that want to see what fixtures do.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `FS_FIXTURE_LOG=fs_fixture=trace`.
pub const LOG_ENV: &str = "FS_FIXTURE_LOG";

/// Install a fmt subscriber that writes through the test harness.
///
/// The filter comes from `FS_FIXTURE_LOG`, then `RUST_LOG`, and defaults to
/// `warn`. Safe to call from every test: only the first call installs
/// anything.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_test_logging();
        init_test_logging();
        tracing::debug!("still alive");
    }
}
