//! # Static Invocation Context
//!
//! `InvocationContext` built from a fixed caller org and transient map.
//! Used by tests and by hosts that have already authenticated the caller.

use crate::domain::OrgId;
use crate::ports::{ContextError, InvocationContext};
use std::collections::HashMap;

/// Invocation context with a fixed caller identity and transient map.
#[derive(Debug, Clone, Default)]
pub struct TransientContext {
    client_org: Option<OrgId>,
    transient: HashMap<String, Vec<u8>>,
}

impl TransientContext {
    /// Context for a client of `org` with no transient fields.
    pub fn for_org(org: impl Into<OrgId>) -> Self {
        Self {
            client_org: Some(org.into()),
            transient: HashMap::new(),
        }
    }

    /// Context whose caller identity cannot be resolved.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Add a transient field.
    pub fn with_transient(mut self, field: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.transient.insert(field.into(), value.into());
        self
    }
}

impl InvocationContext for TransientContext {
    fn transient(&self, field: &str) -> Result<Option<&[u8]>, ContextError> {
        Ok(self.transient.get(field).map(Vec::as_slice))
    }

    fn client_org_id(&self) -> Result<OrgId, ContextError> {
        self.client_org
            .clone()
            .ok_or_else(|| ContextError::Identity("no client identity in context".to_string()))
    }
}
