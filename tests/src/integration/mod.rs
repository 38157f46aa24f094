//! Cross-crate integration tests.

pub mod dispatch;
pub mod flows;
pub mod telemetry;

use debtnote_core::prelude::*;
use std::sync::Arc;

/// Nodes of several orgs sharing one private vault and one public ledger.
pub struct Network {
    pub vault: Arc<InMemoryPrivateVault>,
    pub ledger: Arc<InMemoryPublicLedger>,
    nodes: Vec<Arc<DebtNoteService<InMemoryPrivateVault, InMemoryPublicLedger>>>,
}

impl Network {
    pub fn new(orgs: &[&str], policy: TransferPolicy) -> Self {
        let vault = Arc::new(InMemoryPrivateVault::new());
        let ledger = Arc::new(InMemoryPublicLedger::new());
        let nodes = orgs
            .iter()
            .map(|org| {
                Arc::new(DebtNoteService::with_shared(
                    Arc::clone(&vault),
                    Arc::clone(&ledger),
                    NodeIdentity::new(*org),
                    ServiceConfig::default().with_transfer_policy(policy),
                ))
            })
            .collect();
        Self {
            vault,
            ledger,
            nodes,
        }
    }

    /// The node run by `org`.
    ///
    /// Panics if the network has no node for `org`.
    pub fn node(
        &self,
        org: &str,
    ) -> &Arc<DebtNoteService<InMemoryPrivateVault, InMemoryPublicLedger>> {
        self.nodes
            .iter()
            .find(|node| node.node().org().as_str() == org)
            .unwrap_or_else(|| panic!("no node for {org}"))
    }

    pub fn handler(
        &self,
        org: &str,
    ) -> InvocationHandler<DebtNoteService<InMemoryPrivateVault, InMemoryPublicLedger>> {
        InvocationHandler::new(Arc::clone(self.node(org)))
    }
}

/// JSON payload of a fresh note.
pub fn note_json(id: &str, debtor: &str, amount: u64) -> String {
    format!(r#"{{"id":"{id}","debtorOrg":"{debtor}","amount":{amount},"redeemStatus":"False"}}"#)
}
