//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces to the ledger platform the service runs inside:
//! - `PrivateVault`: org-scoped private collections
//! - `PublicLedger`: shared world state, used only for anchors
//! - `InvocationContext`: transient inputs and caller identity of one call
//!
//! Adapters implement these traits; the service never talks to a concrete
//! store.

use crate::domain::{CollectionName, DebtNoteError, Digest, OrgId};
use thiserror::Error;

// =============================================================================
// ERRORS
// =============================================================================

/// Failure reported by a store adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The platform detected a concurrent conflicting write on `key`.
    #[error("conflicting write on key {key}")]
    Conflict { key: String },

    /// Backend unavailable or failed.
    #[error("backend error: {0}")]
    Backend(String),

    #[error("store lock poisoned")]
    LockPoisoned,
}

impl From<StoreError> for DebtNoteError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { .. } => DebtNoteError::Conflict(err.to_string()),
            other => DebtNoteError::Storage(other.to_string()),
        }
    }
}

/// Failure reading from the invocation context.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("error getting transient: {0}")]
    Transient(String),

    #[error("failed getting client's orgID: {0}")]
    Identity(String),
}

impl From<ContextError> for DebtNoteError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Transient(_) => DebtNoteError::Validation(err.to_string()),
            ContextError::Identity(_) => DebtNoteError::Authorization(err.to_string()),
        }
    }
}

// =============================================================================
// PRIVATE VAULT
// =============================================================================

/// Org-scoped private key/value store.
///
/// Callers may only touch the scope of an org they are authorized to act as;
/// that rule is enforced by the service, not by the store.
pub trait PrivateVault: Send + Sync {
    fn get(&self, scope: &CollectionName, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn put(&self, scope: &CollectionName, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    fn delete(&self, scope: &CollectionName, key: &str) -> Result<(), StoreError>;

    /// Digest of the stored value, as maintained by the store.
    ///
    /// Never materializes the value, so it may be served for any scope.
    fn get_hash(&self, scope: &CollectionName, key: &str) -> Result<Option<Digest>, StoreError>;

    fn contains(&self, scope: &CollectionName, key: &str) -> Result<bool, StoreError> {
        Ok(self.get_hash(scope, key)?.is_some())
    }
}

// =============================================================================
// PUBLIC LEDGER
// =============================================================================

/// Shared key/value world state visible to every participant.
pub trait PublicLedger: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}

// =============================================================================
// INVOCATION CONTEXT
// =============================================================================

/// Per-invocation context supplied by the platform.
pub trait InvocationContext: Send + Sync {
    /// Named private input. `Ok(None)` if the field was not supplied.
    fn transient(&self, field: &str) -> Result<Option<&[u8]>, ContextError>;

    /// Org (MSP id) of the client that submitted the invocation.
    fn client_org_id(&self) -> Result<OrgId, ContextError>;

    /// Transient field that must be present.
    fn required_transient(&self, field: &str) -> Result<&[u8], DebtNoteError> {
        self.transient(field)?.ok_or_else(|| {
            DebtNoteError::Validation(format!("{field} key not found in the transient map"))
        })
    }
}
