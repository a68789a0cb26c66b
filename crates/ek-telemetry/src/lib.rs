//! # Ekonos Telemetry
//!
//! Structured logging for Ekonos processes, built on `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ek_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let _guard = init_telemetry(TelemetryConfig::from_env())?;
//!     // Spans and events from ek-partnership are now printed
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `ekonos` | Service name on every line |
//! | `EK_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directive |
//! | `EK_JSON_LOGS` | `false` | JSON output |
//! | `EK_LOG_TARGET` | `true` | Print targets |

mod config;

pub use config::TelemetryConfig;

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The filter directive did not parse.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("Telemetry already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Installs the global subscriber described by `config`.
///
/// Returns a guard to hold for the lifetime of the process.
///
/// # Errors
///
/// `Filter` for a bad directive, `AlreadyInitialized` if a global subscriber
/// exists.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Filter(e.to_string()))?;

    if config.json_logs {
        // JSON output for containers/production
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(config.with_target)
            .with_thread_ids(true)
            .with_current_span(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;
    } else {
        // Pretty output for development
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(config.with_target)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;
    }

    tracing::info!(
        service = %config.service_name,
        level = %config.log_level,
        json = config.json_logs,
        "telemetry initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Installs a test subscriber once per process; later calls are no-ops.
pub fn init_test_telemetry() {
    let _ = init_telemetry(TelemetryConfig::for_tests());
}

/// Guard that keeps telemetry active for a service.
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    /// Service this guard was created for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}
