use super::OrgId;

/// Identity of the node executing the service.
///
/// Private data is only queryable on the holding org's own node, so several
/// operations require the caller's org to equal this one. Passed into the
/// service explicitly; see `NodeIdentity::from_env` in `config`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIdentity {
    org: OrgId,
}

impl NodeIdentity {
    pub fn new(org: impl Into<OrgId>) -> Self {
        Self { org: org.into() }
    }

    pub fn org(&self) -> &OrgId {
        &self.org
    }
}
