//! # Debt Note Ledger
//!
//! Confidential debt notes shared between organizations. Full records live in
//! the creating org's private scope (`_implicit_org_<org>`); only a SHA-256
//! digest of each record or transfer order is published to the public ledger,
//! so any participant can later check a claimed record against its anchor.
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Anchor of `id` is `sha256` of the exact bytes stored at creation | `service::DebtNoteService::plan_create` |
//! | Anchors are never overwritten or deleted | `service` conflict checks before staging |
//! | Only the debtor org creates or redeems its notes | `service::resolve_caller_org` plus debtor check |
//! | Redeem happens at most once | `DebtNote::redeem` |
//! | A failed operation leaves no private or public trace | `WriteSet` commit with rollback |
//!
//! ## Layout
//!
//! | Layer | Module | Contents |
//! |-------|--------|----------|
//! | Domain | `domain` | Records, anchors, scopes, payload decoding, errors |
//! | Ports | `ports` | `DebtNoteApi` (inbound), vault/ledger/context (outbound) |
//! | Adapters | `adapters` | In-memory stores, transient-map context |
//! | Service | `service` | `DebtNoteService` |
//! | Dispatch | `ipc` | Function-name routing |
//!
//! ## Usage Example
//!
//! ```ignore
//! use debtnote_core::prelude::*;
//!
//! let service = create_test_service("OrgA");
//! let ctx = TransientContext::for_org("OrgA").with_transient(
//!     transient_keys::PROPERTIES,
//!     r#"{"id":"DN1","debtorOrg":"OrgA","amount":100}"#,
//! );
//! service.create_debt_note(&ctx)?;
//! let anchor = service.read_world_state(&ctx, "DN1")?;
//! ```

// Crate-level lints
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ipc;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::{
        decode_debt_note, scope_name, transient_keys, AnchorKey, CollectionName, DebtNote,
        DebtNoteError, Digest, ErrorKind, NodeIdentity, Operation, OrgId, RedeemStatus,
        TransferOrder,
    };

    // Ports
    pub use crate::ports::{DebtNoteApi, InvocationContext, PrivateVault, PublicLedger};

    // Adapters
    pub use crate::adapters::{InMemoryPrivateVault, InMemoryPublicLedger, TransientContext};

    // Config
    pub use crate::config::{ConfigError, ServiceConfig, TransferPolicy};

    // Dispatch
    pub use crate::ipc::{Invocation, InvocationHandler, InvocationResponse};

    // Service
    pub use crate::service::{create_test_service, DebtNoteService, ServiceStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
