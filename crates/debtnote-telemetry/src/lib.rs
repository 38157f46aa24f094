//! # Debt Note Telemetry
//!
//! Logging and metrics for the debt note ledger service.
//!
//! ## Components
//!
//! - **Logs**: `tracing-subscriber` with env filter, pretty or JSON output
//! - **Metrics**: Prometheus counters in a process-wide registry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use debtnote_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `debtnote` | Service name in logs |
//! | `DN_LOG_LEVEL` | `info` | Log level filter |
//! | `DN_JSON_LOGS` | `false` | JSON formatter |
//! | `CORE_PEER_LOCALMSPID` | unset | Org of the executing node |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, record_operation, register_metrics, MetricsHandle, ANCHORS_PUBLISHED,
    OPERATIONS_TOTAL, PRIVATE_WRITES, STORE_CONFLICTS,
};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed
    #[error("Failed to initialize tracing: {0}")]
    TracingInit(String),

    /// Metric registration failed
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics_handle = register_metrics()?;
    init_tracing(&config)?;

    Ok(TelemetryGuard {
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}
