//! Invocations addressed by function name, as clients submit them.

#[cfg(test)]
mod tests {
    use super::super::{note_json, Network};
    use debtnote_core::prelude::*;

    fn no_args() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn test_full_lifecycle_through_handler() {
        let net = Network::new(&["OrgA", "OrgB"], TransferPolicy::Move);
        let org_a = net.handler("OrgA");
        let org_b = net.handler("OrgB");
        let payload = note_json("DN7", "OrgA", 250);

        let ctx = TransientContext::for_org("OrgA")
            .with_transient(transient_keys::PROPERTIES, payload.as_str());
        assert_eq!(
            org_a.invoke("CreateDebtNote", &no_args(), &ctx).unwrap(),
            InvocationResponse::default()
        );

        let ctx = TransientContext::for_org("OrgA")
            .with_transient(transient_keys::REDEEM, r#"{"id":"DN7"}"#);
        org_a.invoke("RedeemDebtNote", &no_args(), &ctx).unwrap();

        let redeemed = org_a
            .invoke(
                "GetDebtNote",
                &["DN7".to_string()],
                &TransientContext::for_org("OrgA"),
            )
            .unwrap()
            .payload
            .unwrap();

        let ctx = TransientContext::for_org("OrgA")
            .with_transient(
                transient_keys::NEW_OWNER,
                r#"{"id":"DN7","newOwnerOrg":"OrgB"}"#,
            )
            .with_transient(transient_keys::NEW_PROPERTIES, redeemed.as_str());
        org_a.invoke("TransferDebtNote", &no_args(), &ctx).unwrap();

        let held = org_b
            .handle(
                &Invocation::new("GetDebtNote", ["DN7"]),
                &TransientContext::for_org("OrgB"),
            )
            .unwrap();
        assert_eq!(held.payload, Some(redeemed.clone()));

        let hash = org_b
            .handle(
                &Invocation::new("GetDebtNoteHash", ["DN7", "OrgB"]),
                &TransientContext::anonymous(),
            )
            .unwrap();
        assert_eq!(hash.payload, Some(Digest::of(redeemed.as_bytes()).to_hex()));

        let ctx = TransientContext::for_org("OrgB")
            .with_transient(transient_keys::PROPERTIES, r#"{"id":"DN7"}"#);
        org_b.invoke("DeleteDebtNote", &no_args(), &ctx).unwrap();

        assert_eq!(net.node("OrgA").stats().notes_transferred, 1);
        assert_eq!(net.node("OrgB").stats().notes_deleted, 1);
    }

    #[test]
    fn test_rejections_reach_the_caller() {
        let net = Network::new(&["OrgA"], TransferPolicy::CopyOnly);
        let handler = net.handler("OrgA");
        let ctx = TransientContext::for_org("OrgA");

        let cases = [
            ("CreateDebtNote", no_args(), ErrorKind::Validation),
            ("GetDebtNote", vec!["DN1".to_string()], ErrorKind::NotFound),
            ("ReadWorldState", no_args(), ErrorKind::Validation),
            ("PayDebtNote", no_args(), ErrorKind::Validation),
        ];
        for (function, args, expected) in cases {
            let err = handler.invoke(function, &args, &ctx).unwrap_err();
            assert_eq!(err.kind(), expected, "{function}");
        }

        assert_eq!(net.node("OrgA").stats().rejected, 2);
    }
}
