use std::fmt;

use super::OrgId;

/// Prefix of every org's implicit private collection.
pub const IMPLICIT_COLLECTION_PREFIX: &str = "_implicit_org_";

/// Name of an org-scoped private collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionName(String);

impl CollectionName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Private scope of `org`.
pub fn scope_name(org: &OrgId) -> CollectionName {
    CollectionName(format!("{IMPLICIT_COLLECTION_PREFIX}{org}"))
}
