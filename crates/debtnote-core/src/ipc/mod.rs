//! # Invocation Dispatch
//!
//! Entry point for clients that address the ledger by function name, as
//! the ledger platform does. Direct Rust callers can use `DebtNoteApi`
//! instead.

pub mod handler;

pub use handler::*;
