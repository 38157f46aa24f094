//! # Invocation Handler
//!
//! Routes a named invocation with positional string arguments to the
//! matching `DebtNoteApi` operation. Mutating operations take no positional
//! arguments: their inputs travel in the transient map of the context.

use crate::domain::{DebtNoteError, Operation};
use crate::ports::{DebtNoteApi, InvocationContext};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A function call as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub function: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result of a successful invocation.
///
/// Mutations return no payload. Reads return the private record or the
/// hex-encoded digest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationResponse {
    pub payload: Option<String>,
}

impl InvocationResponse {
    fn empty() -> Self {
        Self { payload: None }
    }

    fn with_payload(payload: String) -> Self {
        Self {
            payload: Some(payload),
        }
    }
}

/// Name-based dispatcher over a `DebtNoteApi`.
pub struct InvocationHandler<A: DebtNoteApi> {
    api: Arc<A>,
}

impl<A: DebtNoteApi> InvocationHandler<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Dispatch `invocation` on behalf of the client described by `ctx`.
    ///
    /// Unknown function names and wrong argument counts are rejected with
    /// `DebtNoteError::Validation` before the API is called.
    #[instrument(skip(self, invocation, ctx), fields(function = %invocation.function))]
    pub fn handle(
        &self,
        invocation: &Invocation,
        ctx: &dyn InvocationContext,
    ) -> Result<InvocationResponse, DebtNoteError> {
        let op = Operation::from_str(&invocation.function)?;
        let args = &invocation.args;
        if args.len() != op.arity() {
            return Err(DebtNoteError::validation(format!(
                "incorrect number of arguments for {op}: expecting {}, got {}",
                op.arity(),
                args.len()
            )));
        }

        debug!(operation = %op, args = args.len(), "Dispatching invocation");

        let response = match op {
            Operation::CreateDebtNote => {
                self.api.create_debt_note(ctx)?;
                InvocationResponse::empty()
            }
            Operation::DeleteDebtNote => {
                self.api.delete_debt_note(ctx)?;
                InvocationResponse::empty()
            }
            Operation::TransferDebtNote => {
                self.api.transfer_debt_note(ctx)?;
                InvocationResponse::empty()
            }
            Operation::RedeemDebtNote => {
                self.api.redeem_debt_note(ctx)?;
                InvocationResponse::empty()
            }
            Operation::GetDebtNote => {
                InvocationResponse::with_payload(self.api.get_debt_note(ctx, &args[0])?)
            }
            Operation::GetDebtNoteHash => InvocationResponse::with_payload(
                self.api.get_debt_note_hash(ctx, &args[0], &args[1])?,
            ),
            Operation::ReadWorldState => {
                InvocationResponse::with_payload(self.api.read_world_state(ctx, &args[0])?)
            }
        };
        Ok(response)
    }

    /// Dispatch by function name and argument slice.
    pub fn invoke(
        &self,
        function: &str,
        args: &[String],
        ctx: &dyn InvocationContext,
    ) -> Result<InvocationResponse, DebtNoteError> {
        self.handle(&Invocation::new(function, args.iter().cloned()), ctx)
    }
}
