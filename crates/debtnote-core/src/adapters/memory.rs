//! # In-Memory Stores
//!
//! `PrivateVault` and `PublicLedger` backed by hash maps, for tests and local
//! runs. A production deployment wires these ports to the ledger platform's
//! chaincode stub instead.
//!
//! Both stores can be told to reject writes to a key as conflicting, which is
//! how the platform reports an MVCC read/write conflict.

use crate::domain::{CollectionName, Digest};
use crate::ports::{PrivateVault, PublicLedger, StoreError};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// A private value together with the digest the store maintains for it.
#[derive(Debug, Clone)]
struct PrivateEntry {
    value: Vec<u8>,
    hash: Digest,
}

/// In-memory implementation of `PrivateVault`.
#[derive(Debug, Default)]
pub struct InMemoryPrivateVault {
    scopes: RwLock<HashMap<CollectionName, HashMap<String, PrivateEntry>>>,
    conflicted: RwLock<HashSet<String>>,
}

impl InMemoryPrivateVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later write or delete of `key` fail with a conflict.
    pub fn inject_conflict(&self, key: impl Into<String>) -> Result<(), StoreError> {
        self.conflicted
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .insert(key.into());
        Ok(())
    }

    /// Number of records held in `scope`.
    pub fn len(&self, scope: &CollectionName) -> Result<usize, StoreError> {
        let scopes = self.scopes.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(scopes.get(scope).map_or(0, HashMap::len))
    }

    /// Keys held in `scope`, sorted.
    pub fn keys(&self, scope: &CollectionName) -> Result<Vec<String>, StoreError> {
        let scopes = self.scopes.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut keys: Vec<String> = scopes
            .get(scope)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        Ok(keys)
    }

    fn check_conflict(&self, key: &str) -> Result<(), StoreError> {
        let conflicted = self.conflicted.read().map_err(|_| StoreError::LockPoisoned)?;
        if conflicted.contains(key) {
            return Err(StoreError::Conflict {
                key: key.to_string(),
            });
        }
        Ok(())
    }
}

impl PrivateVault for InMemoryPrivateVault {
    fn get(&self, scope: &CollectionName, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let scopes = self.scopes.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(scopes
            .get(scope)
            .and_then(|entries| entries.get(key))
            .map(|entry| entry.value.clone()))
    }

    fn put(&self, scope: &CollectionName, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.check_conflict(key)?;
        let mut scopes = self.scopes.write().map_err(|_| StoreError::LockPoisoned)?;
        let hash = Digest::of(&value);
        scopes
            .entry(scope.clone())
            .or_default()
            .insert(key.to_string(), PrivateEntry { value, hash });
        Ok(())
    }

    fn delete(&self, scope: &CollectionName, key: &str) -> Result<(), StoreError> {
        self.check_conflict(key)?;
        let mut scopes = self.scopes.write().map_err(|_| StoreError::LockPoisoned)?;
        if let Some(entries) = scopes.get_mut(scope) {
            entries.remove(key);
        }
        Ok(())
    }

    fn get_hash(&self, scope: &CollectionName, key: &str) -> Result<Option<Digest>, StoreError> {
        let scopes = self.scopes.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(scopes
            .get(scope)
            .and_then(|entries| entries.get(key))
            .map(|entry| entry.hash))
    }
}

/// In-memory implementation of `PublicLedger`.
#[derive(Debug, Default)]
pub struct InMemoryPublicLedger {
    state: RwLock<HashMap<String, Vec<u8>>>,
    conflicted: RwLock<HashSet<String>>,
}

impl InMemoryPublicLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later write of `key` fail with a conflict.
    pub fn inject_conflict(&self, key: impl Into<String>) -> Result<(), StoreError> {
        self.conflicted
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .insert(key.into());
        Ok(())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self
            .state
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl PublicLedger for InMemoryPublicLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.get(key).cloned())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        if self
            .conflicted
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .contains(key)
        {
            return Err(StoreError::Conflict {
                key: key.to_string(),
            });
        }
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;
        state.insert(key.to_string(), value);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
