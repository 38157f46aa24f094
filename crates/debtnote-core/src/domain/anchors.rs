//! # Integrity Anchors
//!
//! An anchor is the SHA-256 digest of private payload bytes, published on the
//! shared ledger so any participant can later check claimed private bytes
//! against it without ever seeing them beforehand.
//!
//! | Event | Ledger key | Digest over |
//! |-------|------------|-------------|
//! | Creation | `<id>` | the submitted note record |
//! | Transfer | `<id>_TRANSFER` | the transfer order |

use sha2::{Digest as _, Sha256};
use std::fmt;

use super::DebtNoteError;

/// Suffix namespacing the transfer event anchor of a note.
pub const TRANSFER_SUFFIX: &str = "_TRANSFER";

/// Digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// SHA-256 digest of a private payload.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Digest of `bytes`.
    pub fn of(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    /// Interpret raw ledger bytes as a digest. `None` if the length is wrong.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; DIGEST_LEN]>::try_from(bytes).ok().map(Self)
    }

    pub fn from_hex(s: &str) -> Result<Self, DebtNoteError> {
        let bytes = hex::decode(s)
            .map_err(|e| DebtNoteError::validation(format!("invalid hex digest: {e}")))?;
        Self::from_slice(&bytes).ok_or_else(|| {
            DebtNoteError::validation(format!(
                "digest must be {DIGEST_LEN} bytes, got {}",
                bytes.len()
            ))
        })
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lower-case hex, as returned to callers.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// True if `bytes` hash to this digest.
    pub fn matches(&self, bytes: &[u8]) -> bool {
        Self::of(bytes) == *self
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Public ledger key of an anchor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnchorKey(String);

impl AnchorKey {
    /// Key of the anchor written when the note is created.
    pub fn creation(note_id: &str) -> Self {
        Self(note_id.to_string())
    }

    /// Key of the anchor written when the note is transferred.
    pub fn transfer(note_id: &str) -> Self {
        Self(format!("{note_id}{TRANSFER_SUFFIX}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_transfer(&self) -> bool {
        self.0.ends_with(TRANSFER_SUFFIX)
    }
}

impl fmt::Display for AnchorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
