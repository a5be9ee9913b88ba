//! Tracing setup for lingua binaries.
//!
//! # Usage
//!
//! ```ignore
//! use lingua_common::telemetry::{self, TelemetryConfig};
//!
//! fn main() {
//!     telemetry::init(TelemetryConfig::from_env("lingua"));
//!     tracing::info!("ready");
//! }
//! ```
//!
//! The engine logs under the `lingua::mutate` and `lingua::render` targets,
//! so `RUST_LOG=lingua::render=trace` shows every fragment a render pass
//! places.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name for labeling (e.g. "lingua")
    pub service_name: String,
    /// Console log level (default: INFO, DEBUG in debug builds)
    pub console_level: Level,
}

impl TelemetryConfig {
    /// Load config from the environment.
    ///
    /// - `LINGUA_LOG_LEVEL`: `error`..`trace` (optional)
    /// - `RUST_LOG`: Standard env filter (optional, overrides console_level)
    pub fn from_env(service_name: impl Into<String>) -> Self {
        let default_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };
        let console_level = std::env::var("LINGUA_LOG_LEVEL")
            .ok()
            .and_then(|level| level.parse().ok())
            .unwrap_or(default_level);

        Self {
            service_name: service_name.into(),
            console_level,
        }
    }

    /// Quieter config for `--quiet` style flags.
    pub fn with_level(mut self, level: Level) -> Self {
        self.console_level = level;
        self
    }
}

/// Initialize console tracing on stderr.
///
/// Call once at startup. Returns `false` if a global subscriber was already
/// installed, in which case that one stays in place.
pub fn init(config: TelemetryConfig) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.console_level.as_str().to_lowercase()));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_filter(env_filter);

    let installed = tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(service = %config.service_name, "telemetry initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_level_overrides() {
        let config = TelemetryConfig::from_env("lingua-test").with_level(Level::WARN);
        assert_eq!(config.console_level, Level::WARN);
        assert_eq!(config.service_name, "lingua-test");
    }
}
