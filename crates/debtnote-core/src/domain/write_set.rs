//! Staged writes of a single invocation.
//!
//! Operations only record writes here while they check their preconditions.
//! The service applies the set after every check has passed, so a failed
//! operation never leaves partial state behind.

use super::{AnchorKey, CollectionName, Digest};

/// One staged mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    PutPrivate {
        scope: CollectionName,
        key: String,
        value: Vec<u8>,
    },
    DeletePrivate {
        scope: CollectionName,
        key: String,
    },
    PutAnchor {
        key: AnchorKey,
        digest: Digest,
    },
}

/// Ordered list of staged mutations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteSet {
    ops: Vec<WriteOp>,
}

impl WriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_private(&mut self, scope: CollectionName, key: impl Into<String>, value: Vec<u8>) {
        self.ops.push(WriteOp::PutPrivate {
            scope,
            key: key.into(),
            value,
        });
    }

    pub fn delete_private(&mut self, scope: CollectionName, key: impl Into<String>) {
        self.ops.push(WriteOp::DeletePrivate {
            scope,
            key: key.into(),
        });
    }

    pub fn put_anchor(&mut self, key: AnchorKey, digest: Digest) {
        self.ops.push(WriteOp::PutAnchor { key, digest });
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WriteOp> {
        self.ops.iter()
    }

    /// Number of staged anchor writes.
    pub fn anchor_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, WriteOp::PutAnchor { .. }))
            .count()
    }
}

impl IntoIterator for WriteSet {
    type Item = WriteOp;
    type IntoIter = std::vec::IntoIter<WriteOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}
