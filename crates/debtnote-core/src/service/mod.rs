//! # Debt Note Service
//!
//! Implements `DebtNoteApi` on top of the vault, ledger and identity ports.
//!
//! Every mutating operation runs in two phases:
//! 1. **Plan**: resolve the caller, decode inputs, read the state needed for
//!    authorization and invariant checks, and stage writes in a `WriteSet`.
//! 2. **Commit**: apply the staged writes, private writes first and the
//!    anchor last. A store failure rolls back the private writes already
//!    applied, so a failed operation leaves no trace.
//!
//! ## Authorization
//!
//! | Operation | Caller must match node | Extra check |
//! |-----------|------------------------|-------------|
//! | `CreateDebtNote` | yes | caller is `debtorOrg` |
//! | `DeleteDebtNote` | no | record in caller's scope |
//! | `TransferDebtNote` | only with `TransferPolicy::Move` | caller holds the record (`Move`) |
//! | `RedeemDebtNote` | yes | caller is `debtorOrg` |
//! | `GetDebtNote` | yes | - |
//! | `GetDebtNoteHash` | no | - |
//! | `ReadWorldState` | no | - |

mod identity;

pub use identity::resolve_caller_org;

use crate::adapters::{InMemoryPrivateVault, InMemoryPublicLedger};
use crate::config::{ServiceConfig, TransferPolicy};
use crate::domain::{
    decode_debt_note, decode_new_debt_note, decode_note_ref, decode_transfer_order,
    mark_redeemed, scope_name, transient_keys, AnchorKey, CollectionName, DebtNote,
    DebtNoteError, Digest, NodeIdentity, Operation, OrgId, WriteOp, WriteSet, DIGEST_LEN,
};
use crate::ports::{DebtNoteApi, InvocationContext, PrivateVault, PublicLedger, StoreError};

use debtnote_telemetry::{
    log_anchor_event, log_note_event, record_operation, ANCHORS_PUBLISHED, PRIVATE_WRITES,
    STORE_CONFLICTS,
};
use std::sync::{Arc, RwLock};
use tracing::{debug, error, instrument, warn};

/// Counters kept by the service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    pub notes_created: u64,
    pub notes_transferred: u64,
    pub notes_redeemed: u64,
    pub notes_deleted: u64,
    /// Successful read-only operations.
    pub reads: u64,
    /// Operations that failed for any reason.
    pub rejected: u64,
}

/// Debt note service for one node.
///
/// Several services (one per org node) may share the same stores through
/// [`DebtNoteService::with_shared`].
pub struct DebtNoteService<V: PrivateVault, L: PublicLedger> {
    config: ServiceConfig,
    node: NodeIdentity,
    vault: Arc<V>,
    ledger: Arc<L>,
    stats: RwLock<ServiceStats>,
}

/// Private value of `(scope, key)` before the commit touched it.
type UndoEntry = (CollectionName, String, Option<Vec<u8>>);

/// Writes staged by a plan, with the note and org the event is about.
struct Staged {
    writes: WriteSet,
    note_id: String,
    /// Caller for create, delete and redeem; new owner for transfer.
    org: OrgId,
    amount: Option<u64>,
}

impl<V: PrivateVault, L: PublicLedger> DebtNoteService<V, L> {
    pub fn new(vault: V, ledger: L, node: NodeIdentity, config: ServiceConfig) -> Self {
        Self::with_shared(Arc::new(vault), Arc::new(ledger), node, config)
    }

    pub fn with_shared(
        vault: Arc<V>,
        ledger: Arc<L>,
        node: NodeIdentity,
        config: ServiceConfig,
    ) -> Self {
        Self {
            config,
            node,
            vault,
            ledger,
            stats: RwLock::new(ServiceStats::default()),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn node(&self) -> &NodeIdentity {
        &self.node
    }

    pub fn vault(&self) -> &Arc<V> {
        &self.vault
    }

    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    pub fn stats(&self) -> ServiceStats {
        self.stats
            .read()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    // =========================================================================
    // PLAN PHASE
    // =========================================================================

    fn plan_create(&self, ctx: &dyn InvocationContext) -> Result<Staged, DebtNoteError> {
        let payload = ctx.required_transient(transient_keys::PROPERTIES)?;
        let note = decode_new_debt_note(payload)?;

        let caller = resolve_caller_org(ctx, &self.node, true)?;

        let anchor_key = AnchorKey::creation(&note.id);
        if self.ledger.contains(anchor_key.as_str())? {
            return Err(DebtNoteError::conflict(format!("{} already exists", note.id)));
        }

        let scope = scope_name(&caller);
        if self.vault.contains(&scope, &note.id)? {
            return Err(DebtNoteError::conflict(format!(
                "debt note {} already exists in your private space",
                note.id
            )));
        }

        if note.debtor_org != caller {
            return Err(DebtNoteError::authorization(format!(
                "org {caller} cannot create a debt note naming {} as debtor",
                note.debtor_org
            )));
        }

        let mut writes = WriteSet::new();
        writes.put_private(scope, note.id.clone(), payload.to_vec());
        writes.put_anchor(anchor_key, Digest::of(payload));

        Ok(Staged {
            writes,
            note_id: note.id,
            org: caller,
            amount: Some(note.amount),
        })
    }

    fn plan_delete(&self, ctx: &dyn InvocationContext) -> Result<Staged, DebtNoteError> {
        let caller = resolve_caller_org(ctx, &self.node, false)?;
        let note_ref = decode_note_ref(ctx.required_transient(transient_keys::PROPERTIES)?)?;

        let scope = scope_name(&caller);
        if !self.vault.contains(&scope, &note_ref.id)? {
            return Err(DebtNoteError::not_found(format!(
                "debt note {} in your private space",
                note_ref.id
            )));
        }

        let mut writes = WriteSet::new();
        writes.delete_private(scope, note_ref.id.clone());

        Ok(Staged {
            writes,
            note_id: note_ref.id,
            org: caller,
            amount: None,
        })
    }

    fn plan_transfer(&self, ctx: &dyn InvocationContext) -> Result<Staged, DebtNoteError> {
        let order_bytes = ctx.required_transient(transient_keys::NEW_OWNER)?;
        let record_bytes = ctx.required_transient(transient_keys::NEW_PROPERTIES)?;

        let order = decode_transfer_order(order_bytes)?;
        let record = decode_debt_note(record_bytes)?;
        if record.id != order.id {
            return Err(DebtNoteError::validation(format!(
                "transferable record {} does not match transfer order {}",
                record.id, order.id
            )));
        }

        let anchor_key = AnchorKey::transfer(&order.id);
        if self.ledger.contains(anchor_key.as_str())? {
            return Err(DebtNoteError::conflict(format!(
                "transfer of {} is already anchored",
                order.id
            )));
        }

        let mut writes = WriteSet::new();
        if self.config.transfer_policy == TransferPolicy::Move {
            let caller = resolve_caller_org(ctx, &self.node, true)?;
            if caller == order.new_owner_org {
                return Err(DebtNoteError::validation(format!(
                    "debt note {} is already held by {caller}",
                    order.id
                )));
            }

            let source = scope_name(&caller);
            let held = self.vault.get(&source, &order.id)?.ok_or_else(|| {
                DebtNoteError::not_found(format!(
                    "debt note {} in your private space",
                    order.id
                ))
            })?;
            if decode_stored(&order.id, &held)? != record {
                return Err(DebtNoteError::validation(format!(
                    "transferable record {} differs from the record you hold",
                    order.id
                )));
            }
            writes.delete_private(source, order.id.clone());
        }

        writes.put_private(
            scope_name(&order.new_owner_org),
            order.id.clone(),
            record_bytes.to_vec(),
        );
        writes.put_anchor(anchor_key, Digest::of(order_bytes));

        Ok(Staged {
            writes,
            note_id: order.id,
            org: order.new_owner_org,
            amount: Some(record.amount),
        })
    }

    fn plan_redeem(&self, ctx: &dyn InvocationContext) -> Result<Staged, DebtNoteError> {
        let note_ref = decode_note_ref(ctx.required_transient(transient_keys::REDEEM)?)?;
        let caller = resolve_caller_org(ctx, &self.node, true)?;

        let scope = scope_name(&caller);
        let stored = self
            .vault
            .get(&scope, &note_ref.id)?
            .ok_or_else(|| DebtNoteError::not_found(format!("debt note {}", note_ref.id)))?;

        let mut note = decode_stored(&note_ref.id, &stored)?;
        if note.debtor_org != caller {
            return Err(DebtNoteError::authorization(format!(
                "a client from {caller} cannot redeem a debt note owed by {}",
                note.debtor_org
            )));
        }
        note.redeem()?;

        // Only the flag changes; the rest of the stored record is kept as is.
        let mut writes = WriteSet::new();
        writes.put_private(scope, note_ref.id.clone(), mark_redeemed(&stored)?);

        Ok(Staged {
            writes,
            note_id: note_ref.id,
            org: caller,
            amount: Some(note.amount),
        })
    }

    // =========================================================================
    // READS
    // =========================================================================

    fn read_note(&self, ctx: &dyn InvocationContext, id: &str) -> Result<String, DebtNoteError> {
        let caller = resolve_caller_org(ctx, &self.node, true)?;
        let bytes = self.vault.get(&scope_name(&caller), id)?.ok_or_else(|| {
            DebtNoteError::not_found(format!("debt note {id} in client org's collection"))
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn read_note_hash(&self, id: &str, org: &str) -> Result<String, DebtNoteError> {
        let scope = scope_name(&OrgId::new(org));
        let digest = self.vault.get_hash(&scope, id)?.ok_or_else(|| {
            DebtNoteError::not_found(format!("private hash of debt note {id} for {org}"))
        })?;
        Ok(digest.to_hex())
    }

    fn read_public(&self, key: &str) -> Result<String, DebtNoteError> {
        let value = self
            .ledger
            .get(key)?
            .ok_or_else(|| DebtNoteError::not_found(key))?;
        Ok(hex::encode(value))
    }

    // =========================================================================
    // COMMIT PHASE
    // =========================================================================

    /// Apply staged writes: private operations in order, then anchors.
    fn commit(&self, writes: WriteSet) -> Result<(), DebtNoteError> {
        let (private_ops, anchor_ops): (Vec<WriteOp>, Vec<WriteOp>) = writes
            .into_iter()
            .partition(|op| !matches!(op, WriteOp::PutAnchor { .. }));

        let mut undo: Vec<UndoEntry> = Vec::with_capacity(private_ops.len());
        for op in private_ops.into_iter().chain(anchor_ops) {
            if let Err(err) = self.apply(op, &mut undo) {
                if matches!(err, StoreError::Conflict { .. }) {
                    STORE_CONFLICTS.inc();
                }
                self.rollback(undo);
                return Err(err.into());
            }
        }
        Ok(())
    }

    fn apply(&self, op: WriteOp, undo: &mut Vec<UndoEntry>) -> Result<(), StoreError> {
        match op {
            WriteOp::PutPrivate { scope, key, value } => {
                let previous = self.vault.get(&scope, &key)?;
                self.vault.put(&scope, &key, value)?;
                undo.push((scope, key, previous));
                PRIVATE_WRITES.with_label_values(&["put"]).inc();
            }
            WriteOp::DeletePrivate { scope, key } => {
                let previous = self.vault.get(&scope, &key)?;
                self.vault.delete(&scope, &key)?;
                undo.push((scope, key, previous));
                PRIVATE_WRITES.with_label_values(&["delete"]).inc();
            }
            WriteOp::PutAnchor { key, digest } => {
                self.ledger.put(key.as_str(), digest.as_bytes().to_vec())?;
                let kind = if key.is_transfer() { "transfer" } else { "creation" };
                ANCHORS_PUBLISHED.with_label_values(&[kind]).inc();
                log_anchor_event!(debug, "Anchor published", key, digest);
            }
        }
        Ok(())
    }

    fn rollback(&self, undo: Vec<UndoEntry>) {
        for (scope, key, previous) in undo.into_iter().rev() {
            let restored = match previous {
                Some(value) => self.vault.put(&scope, &key, value),
                None => self.vault.delete(&scope, &key),
            };
            if let Err(e) = restored {
                error!(scope = %scope, key = %key, error = %e, "Rollback of private write failed");
            }
        }
    }

    // =========================================================================
    // BOOKKEEPING
    // =========================================================================

    fn finish<T>(
        &self,
        op: Operation,
        result: Result<T, DebtNoteError>,
    ) -> Result<T, DebtNoteError> {
        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind().as_str(),
        };
        record_operation(op.as_str(), outcome);

        if let Ok(mut stats) = self.stats.write() {
            match (&result, op) {
                (Err(_), _) => stats.rejected += 1,
                (Ok(_), Operation::CreateDebtNote) => stats.notes_created += 1,
                (Ok(_), Operation::TransferDebtNote) => stats.notes_transferred += 1,
                (Ok(_), Operation::RedeemDebtNote) => stats.notes_redeemed += 1,
                (Ok(_), Operation::DeleteDebtNote) => stats.notes_deleted += 1,
                (Ok(_), _) => stats.reads += 1,
            }
        }

        if let Err(e) = &result {
            debug!(operation = %op, kind = outcome, error = %e, "Operation rejected");
        }
        result
    }

    fn run_mutation<F>(&self, op: Operation, plan: F) -> Result<(), DebtNoteError>
    where
        F: FnOnce() -> Result<Staged, DebtNoteError>,
    {
        let result = plan().and_then(|staged| {
            let Staged {
                writes,
                note_id,
                org,
                amount,
            } = staged;
            self.commit(writes)?;
            self.log_committed(op, &note_id, &org, amount);
            Ok(())
        });
        self.finish(op, result)
    }

    /// Success event, emitted only once the writes are in the stores.
    fn log_committed(&self, op: Operation, note_id: &str, org: &OrgId, amount: Option<u64>) {
        match op {
            Operation::CreateDebtNote => {
                log_note_event!(info, "Debt note created", note_id, org, amount = amount)
            }
            Operation::DeleteDebtNote => log_note_event!(info, "Debt note deleted", note_id, org),
            Operation::TransferDebtNote => {
                log_note_event!(
                    info,
                    "Debt note transferred",
                    note_id,
                    org,
                    policy = %self.config.transfer_policy
                );
                if self.config.transfer_policy == TransferPolicy::CopyOnly {
                    warn!(
                        note_id = %note_id,
                        new_owner = %org,
                        "Transfer leaves the sender's private copy in place; it must be deleted separately"
                    );
                }
            }
            Operation::RedeemDebtNote => {
                log_note_event!(info, "Debt note redeemed", note_id, org, amount = amount)
            }
            _ => {}
        }
    }
}

/// Decode a record read back from a private scope.
fn decode_stored(id: &str, bytes: &[u8]) -> Result<DebtNote, DebtNoteError> {
    decode_debt_note(bytes).map_err(|e| {
        DebtNoteError::Storage(format!("stored debt note {id} is unreadable: {e}"))
    })
}

// =============================================================================
// DebtNoteApi Implementation
// =============================================================================

impl<V: PrivateVault, L: PublicLedger> DebtNoteApi for DebtNoteService<V, L> {
    #[instrument(skip(self, ctx), fields(node = %self.node.org()))]
    fn create_debt_note(&self, ctx: &dyn InvocationContext) -> Result<(), DebtNoteError> {
        self.run_mutation(Operation::CreateDebtNote, || self.plan_create(ctx))
    }

    #[instrument(skip(self, ctx), fields(node = %self.node.org()))]
    fn delete_debt_note(&self, ctx: &dyn InvocationContext) -> Result<(), DebtNoteError> {
        self.run_mutation(Operation::DeleteDebtNote, || self.plan_delete(ctx))
    }

    #[instrument(skip(self, ctx), fields(node = %self.node.org()))]
    fn transfer_debt_note(&self, ctx: &dyn InvocationContext) -> Result<(), DebtNoteError> {
        self.run_mutation(Operation::TransferDebtNote, || self.plan_transfer(ctx))
    }

    #[instrument(skip(self, ctx), fields(node = %self.node.org()))]
    fn redeem_debt_note(&self, ctx: &dyn InvocationContext) -> Result<(), DebtNoteError> {
        self.run_mutation(Operation::RedeemDebtNote, || self.plan_redeem(ctx))
    }

    #[instrument(skip(self, ctx), fields(node = %self.node.org()))]
    fn get_debt_note(
        &self,
        ctx: &dyn InvocationContext,
        id: &str,
    ) -> Result<String, DebtNoteError> {
        let result = self.read_note(ctx, id);
        self.finish(Operation::GetDebtNote, result)
    }

    #[instrument(skip(self, _ctx))]
    fn get_debt_note_hash(
        &self,
        _ctx: &dyn InvocationContext,
        id: &str,
        org: &str,
    ) -> Result<String, DebtNoteError> {
        let result = self.read_note_hash(id, org);
        self.finish(Operation::GetDebtNoteHash, result)
    }

    #[instrument(skip(self, _ctx))]
    fn read_world_state(
        &self,
        _ctx: &dyn InvocationContext,
        key: &str,
    ) -> Result<String, DebtNoteError> {
        let result = self.read_public(key);
        self.finish(Operation::ReadWorldState, result)
    }

    fn verify_anchor(&self, key: &str, claimed: &[u8]) -> Result<bool, DebtNoteError> {
        let value = self
            .ledger
            .get(key)?
            .ok_or_else(|| DebtNoteError::not_found(format!("anchor {key}")))?;
        let anchor = Digest::from_slice(&value).ok_or_else(|| {
            DebtNoteError::Storage(format!("value at {key} is not a {DIGEST_LEN}-byte digest"))
        })?;
        Ok(anchor.matches(claimed))
    }
}

/// Service with in-memory stores for a node of `org` (for testing).
#[must_use]
pub fn create_test_service(org: &str) -> DebtNoteService<InMemoryPrivateVault, InMemoryPublicLedger> {
    DebtNoteService::new(
        InMemoryPrivateVault::new(),
        InMemoryPublicLedger::new(),
        NodeIdentity::new(org),
        ServiceConfig::default(),
    )
}
