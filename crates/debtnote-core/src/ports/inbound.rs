//! # Driving Ports (API - Inbound)
//!
//! The operation surface of the debt note service. Mutating operations take
//! their private inputs from transient fields of the context; read-only
//! operations take plain arguments.

use crate::domain::DebtNoteError;
use crate::ports::outbound::InvocationContext;

/// Primary API for debt note operations.
pub trait DebtNoteApi: Send + Sync {
    // === Mutations ===

    /// Create a note owned and owed by the caller's org.
    ///
    /// Input: `debtnote_properties`. Writes the record to the caller's scope
    /// and its digest to the public ledger under the note id.
    fn create_debt_note(&self, ctx: &dyn InvocationContext) -> Result<(), DebtNoteError>;

    /// Remove the caller's private copy. The public anchor stays.
    ///
    /// Input: `debtnote_properties` (`{id}`).
    fn delete_debt_note(&self, ctx: &dyn InvocationContext) -> Result<(), DebtNoteError>;

    /// Place a note record in the new owner's scope and anchor the transfer.
    ///
    /// Inputs: `debtnote_new_owner`, `debtnote_newproperties`.
    fn transfer_debt_note(&self, ctx: &dyn InvocationContext) -> Result<(), DebtNoteError>;

    /// Mark a note redeemed. Only the debtor org may do this, once.
    ///
    /// Input: `debtnote_redeem` (`{id}`).
    fn redeem_debt_note(&self, ctx: &dyn InvocationContext) -> Result<(), DebtNoteError>;

    // === Reads ===

    /// Private record from the caller's own scope.
    fn get_debt_note(&self, ctx: &dyn InvocationContext, id: &str)
        -> Result<String, DebtNoteError>;

    /// Hex digest of a record held in `org`'s scope. No identity check.
    fn get_debt_note_hash(
        &self,
        ctx: &dyn InvocationContext,
        id: &str,
        org: &str,
    ) -> Result<String, DebtNoteError>;

    /// Hex of the raw public ledger value at `key`. No identity check.
    fn read_world_state(
        &self,
        ctx: &dyn InvocationContext,
        key: &str,
    ) -> Result<String, DebtNoteError>;

    // === Verification ===

    /// Check claimed private bytes against the anchor published at `key`.
    fn verify_anchor(&self, key: &str, claimed: &[u8]) -> Result<bool, DebtNoteError>;
}
