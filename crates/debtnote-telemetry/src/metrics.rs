//! Prometheus metrics for the debt note service.
//!
//! All metrics follow the naming convention: `dn_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};
use std::sync::{Arc, OnceLock};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Operations handled, by operation name and outcome
    pub static ref OPERATIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("dn_service_operations_total", "Debt note operations by name and outcome"),
        &["operation", "outcome"]  // outcome: ok / validation / authorization / not_found / conflict / storage
    ).expect("metric creation failed");

    /// Public anchors written to the shared ledger
    pub static ref ANCHORS_PUBLISHED: CounterVec = CounterVec::new(
        Opts::new("dn_ledger_anchors_published_total", "Digests written to the public ledger"),
        &["kind"]  // kind: creation / transfer
    ).expect("metric creation failed");

    /// Private store mutations
    pub static ref PRIVATE_WRITES: CounterVec = CounterVec::new(
        Opts::new("dn_vault_writes_total", "Writes and deletes applied to private scopes"),
        &["kind"]  // kind: put / delete
    ).expect("metric creation failed");

    /// Write sets rejected by the store as conflicting
    pub static ref STORE_CONFLICTS: Counter = Counter::new(
        "dn_store_conflicts_total",
        "Writes rejected by the store because of a concurrent conflicting write"
    ).expect("metric creation failed");
}

static REGISTRATION: OnceLock<Result<(), String>> = OnceLock::new();

/// Handle to the registered metrics.
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; registration happens on the first call.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    REGISTRATION
        .get_or_init(|| {
            let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
                Box::new(OPERATIONS_TOTAL.clone()),
                Box::new(ANCHORS_PUBLISHED.clone()),
                Box::new(PRIVATE_WRITES.clone()),
                Box::new(STORE_CONFLICTS.clone()),
            ];

            for metric in metrics {
                REGISTRY.register(metric).map_err(|e| e.to_string())?;
            }
            Ok(())
        })
        .clone()
        .map_err(TelemetryError::MetricsInit)?;

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Count one finished operation.
pub fn record_operation(operation: &str, outcome: &str) {
    OPERATIONS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
}
