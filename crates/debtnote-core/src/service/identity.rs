//! Caller identity resolution.

use crate::domain::{DebtNoteError, NodeIdentity, OrgId};
use crate::ports::InvocationContext;

/// Resolve the caller's org from the invocation context.
///
/// With `verify_matches_node` set, the caller must belong to the same org as
/// the executing node: a client from another org must not read or write
/// private data through this node.
pub fn resolve_caller_org(
    ctx: &dyn InvocationContext,
    node: &NodeIdentity,
    verify_matches_node: bool,
) -> Result<OrgId, DebtNoteError> {
    let caller = ctx.client_org_id()?;
    if caller.is_empty() {
        return Err(DebtNoteError::authorization("client org id is empty"));
    }

    if verify_matches_node && &caller != node.org() {
        return Err(DebtNoteError::authorization(format!(
            "client from org {caller} is not authorized to read or write private data from an org {} node",
            node.org()
        )));
    }

    Ok(caller)
}
