//! Telemetry wiring: global subscriber installation and the metrics the
//! service reports.

#[cfg(test)]
mod tests {
    use debtnote_core::prelude::*;
    use debtnote_telemetry::{encode_metrics, init_telemetry, init_tracing, TelemetryConfig};

    #[test]
    fn test_subscriber_installs_once() {
        let config = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::for_org("OrgA")
        };

        // Only this test installs a global subscriber in this binary.
        let guard = init_telemetry(config.clone());
        assert!(guard.is_ok());

        let err = init_tracing(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to initialize tracing"));

        tracing::info!(org = "OrgA", "Subscriber installed");
        drop(guard);
    }

    #[test]
    fn test_service_operations_are_exported() {
        debtnote_telemetry::register_metrics().unwrap();

        let service = create_test_service("OrgM");
        let ctx = TransientContext::for_org("OrgM").with_transient(
            transient_keys::PROPERTIES,
            r#"{"id":"M1","debtorOrg":"OrgM","amount":3}"#,
        );
        service.create_debt_note(&ctx).unwrap();
        let _ = service.create_debt_note(&ctx);

        let text = encode_metrics().unwrap();
        assert!(text.contains("dn_service_operations_total"));
        assert!(text.contains(r#"operation="CreateDebtNote""#));
        assert!(text.contains(r#"outcome="conflict""#));
        assert!(text.contains("dn_ledger_anchors_published_total"));
        assert!(text.contains("dn_vault_writes_total"));
    }
}
