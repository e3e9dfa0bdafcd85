//! Tracing subscriber initialization.
//!
//! Filtering follows `RUST_LOG` (default `info`). Output is human-readable unless
//! `SAO_LOG_FORMAT=json`.

use tracing_subscriber::EnvFilter;

pub const FORMAT_ENV: &str = "SAO_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// Unknown values fall back to `Pretty`.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Directive used when `RUST_LOG` is unset or invalid.
    pub default_directive: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            default_directive: "info".to_owned(),
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        let format = std::env::var(FORMAT_ENV)
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();
        Self {
            format,
            ..Self::default()
        }
    }
}

/// Install the global subscriber. Later calls leave the first one in place.
pub fn init(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match config.format {
        LogFormat::Json => builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init(),
        LogFormat::Pretty => builder.compact().without_time().try_init(),
    };
}
