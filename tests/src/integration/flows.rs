//! # Integration Test Flows
//!
//! Several org nodes share one vault and one public ledger, as peers of a
//! channel do. Each test drives a note through its lifecycle from the nodes
//! of the orgs involved and checks both stores afterwards.

#[cfg(test)]
mod tests {
    use super::super::{note_json, Network};
    use debtnote_core::prelude::*;
    use sha2::{Digest as _, Sha256};
    use std::thread;

    fn props(org: &str, payload: &str) -> TransientContext {
        TransientContext::for_org(org).with_transient(transient_keys::PROPERTIES, payload)
    }

    fn note_ref(org: &str, field: &str, id: &str) -> TransientContext {
        TransientContext::for_org(org).with_transient(field, format!(r#"{{"id":"{id}"}}"#))
    }

    fn transfer(org: &str, id: &str, to: &str, record: &str) -> TransientContext {
        TransientContext::for_org(org)
            .with_transient(
                transient_keys::NEW_OWNER,
                format!(r#"{{"id":"{id}","newOwnerOrg":"{to}"}}"#),
            )
            .with_transient(transient_keys::NEW_PROPERTIES, record)
    }

    fn sha256_hex(bytes: &[u8]) -> String {
        hex::encode(Sha256::digest(bytes))
    }

    // =========================================================================
    // CREATE / REDEEM
    // =========================================================================

    #[test]
    fn test_anchor_is_independently_verifiable() {
        let net = Network::new(&["OrgA", "OrgB"], TransferPolicy::CopyOnly);
        let payload = note_json("DN1", "OrgA", 100);

        net.node("OrgA")
            .create_debt_note(&props("OrgA", &payload))
            .unwrap();

        // OrgB cannot read the record but can check a disclosed copy
        let outsider = TransientContext::for_org("OrgB");
        let anchor = net.node("OrgB").read_world_state(&outsider, "DN1").unwrap();
        assert_eq!(anchor, sha256_hex(payload.as_bytes()));
        assert_eq!(
            net.node("OrgB")
                .get_debt_note_hash(&outsider, "DN1", "OrgA")
                .unwrap(),
            anchor
        );
        assert!(net
            .node("OrgB")
            .verify_anchor("DN1", payload.as_bytes())
            .unwrap());
        assert!(!net
            .node("OrgB")
            .verify_anchor("DN1", note_json("DN1", "OrgA", 1).as_bytes())
            .unwrap());

        assert_eq!(
            net.node("OrgB")
                .get_debt_note(&outsider, "DN1")
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_redeemed_record_diverges_from_anchor() {
        let net = Network::new(&["OrgA"], TransferPolicy::CopyOnly);
        let node = net.node("OrgA");
        let payload = note_json("DN1", "OrgA", 100);

        node.create_debt_note(&props("OrgA", &payload)).unwrap();
        node.redeem_debt_note(&note_ref("OrgA", transient_keys::REDEEM, "DN1"))
            .unwrap();

        let ctx = TransientContext::for_org("OrgA");
        let record = node.get_debt_note(&ctx, "DN1").unwrap();
        let note: serde_json::Value = serde_json::from_str(&record).unwrap();
        assert_eq!(note["redeemStatus"], "True");
        assert_eq!(note["amount"], 100);

        // The anchor still commits to the creation-time bytes
        let anchor = node.read_world_state(&ctx, "DN1").unwrap();
        assert_eq!(anchor, sha256_hex(payload.as_bytes()));
        assert_ne!(
            node.get_debt_note_hash(&ctx, "DN1", "OrgA").unwrap(),
            anchor
        );
    }

    #[test]
    fn test_same_id_in_two_orgs_conflicts_on_anchor() {
        let net = Network::new(&["OrgA", "OrgB"], TransferPolicy::CopyOnly);

        net.node("OrgA")
            .create_debt_note(&props("OrgA", &note_json("DN1", "OrgA", 5)))
            .unwrap();
        let err = net
            .node("OrgB")
            .create_debt_note(&props("OrgB", &note_json("DN1", "OrgB", 5)))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        let scope_b = scope_name(&OrgId::new("OrgB"));
        assert!(net.vault.keys(&scope_b).unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_creates_from_many_orgs() {
        let orgs = ["OrgA", "OrgB", "OrgC", "OrgD"];
        let net = Network::new(&orgs, TransferPolicy::CopyOnly);

        thread::scope(|s| {
            for org in orgs {
                let node = net.node(org);
                s.spawn(move || {
                    for i in 0..25 {
                        let id = format!("{org}-{i}");
                        node.create_debt_note(&props(org, &note_json(&id, org, i + 1)))
                            .unwrap();
                    }
                });
            }
        });

        assert_eq!(net.ledger.len().unwrap(), 100);
        for org in orgs {
            let scope = scope_name(&OrgId::new(org));
            assert_eq!(net.vault.len(&scope).unwrap(), 25);
            assert_eq!(net.node(org).stats().notes_created, 25);
        }
    }

    // =========================================================================
    // TRANSFER
    // =========================================================================

    #[test]
    fn test_copy_transfer_then_sender_deletes() {
        let net = Network::new(&["OrgA", "OrgB"], TransferPolicy::CopyOnly);
        let payload = note_json("DN1", "OrgA", 100);
        net.node("OrgA")
            .create_debt_note(&props("OrgA", &payload))
            .unwrap();

        net.node("OrgA")
            .transfer_debt_note(&transfer("OrgA", "DN1", "OrgB", &payload))
            .unwrap();
        net.node("OrgA")
            .delete_debt_note(&note_ref("OrgA", transient_keys::PROPERTIES, "DN1"))
            .unwrap();

        let ctx_a = TransientContext::for_org("OrgA");
        let ctx_b = TransientContext::for_org("OrgB");
        assert_eq!(
            net.node("OrgA")
                .get_debt_note(&ctx_a, "DN1")
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(net.node("OrgB").get_debt_note(&ctx_b, "DN1").unwrap(), payload);

        // Creation anchor plus transfer anchor
        assert_eq!(net.ledger.len().unwrap(), 2);
        let order = r#"{"id":"DN1","newOwnerOrg":"OrgB"}"#;
        assert!(net
            .node("OrgB")
            .verify_anchor("DN1_TRANSFER", order.as_bytes())
            .unwrap());
    }

    #[test]
    fn test_moved_note_cannot_be_redeemed_by_former_holder() {
        let net = Network::new(&["OrgA", "OrgB"], TransferPolicy::Move);
        let payload = note_json("DN1", "OrgA", 100);
        net.node("OrgA")
            .create_debt_note(&props("OrgA", &payload))
            .unwrap();
        net.node("OrgA")
            .transfer_debt_note(&transfer("OrgA", "DN1", "OrgB", &payload))
            .unwrap();

        let err = net
            .node("OrgA")
            .redeem_debt_note(&note_ref("OrgA", transient_keys::REDEEM, "DN1"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        // The holder is not the debtor either
        let err = net
            .node("OrgB")
            .redeem_debt_note(&note_ref("OrgB", transient_keys::REDEEM, "DN1"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        // Nor can the note move twice
        let err = net
            .node("OrgB")
            .transfer_debt_note(&transfer("OrgB", "DN1", "OrgA", &payload))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_failed_transfer_leaves_no_trace() {
        let net = Network::new(&["OrgA", "OrgB"], TransferPolicy::CopyOnly);
        let payload = note_json("DN1", "OrgA", 100);
        net.node("OrgA")
            .create_debt_note(&props("OrgA", &payload))
            .unwrap();
        net.ledger.inject_conflict("DN1_TRANSFER").unwrap();

        let err = net
            .node("OrgA")
            .transfer_debt_note(&transfer("OrgA", "DN1", "OrgB", &payload))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(net.ledger.len().unwrap(), 1);
        let scope_b = scope_name(&OrgId::new("OrgB"));
        assert_eq!(net.vault.len(&scope_b).unwrap(), 0);
    }
}
