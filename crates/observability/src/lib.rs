//! Process-wide logging setup for the catalog binaries.

/// Initialize logging with settings read from the environment.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    logging::init(&logging::LogConfig::from_env());
}

/// Subscriber configuration (filter, output format).
pub mod logging;
