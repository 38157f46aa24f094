//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Organization (MSP id) of the node running the service, if known
    pub node_org: Option<String>,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to enable console output (for development)
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,

    /// Network identifier (devnet, testnet, production)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "debtnote".to_string(),
            node_org: None,
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            network: "devnet".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: debtnote)
    /// - `CORE_PEER_LOCALMSPID`: Org of the executing node (default: unset)
    /// - `DN_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `DN_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `DN_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    /// - `DN_NETWORK`: Network name (default: devnet)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "debtnote".to_string()),

            node_org: env::var("CORE_PEER_LOCALMSPID")
                .ok()
                .filter(|org| !org.is_empty()),

            log_level: env::var("DN_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("DN_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: env::var("DN_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),

            network: env::var("DN_NETWORK").unwrap_or_else(|_| "devnet".to_string()),
        }
    }

    /// Create configuration for the node of a given organization.
    pub fn for_org(org: &str) -> Self {
        let mut config = Self::from_env();
        config.node_org = Some(org.to_string());
        config
    }

    /// Service name qualified with the node org, e.g. `debtnote-Org1MSP`.
    pub fn full_service_name(&self) -> String {
        match &self.node_org {
            Some(org) => format!("{}-{}", self.service_name, org),
            None => self.service_name.clone(),
        }
    }
}
