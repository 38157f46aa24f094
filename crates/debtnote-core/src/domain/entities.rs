use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DebtNoteError;

/// Organization identifier (MSP id), e.g. `Org1MSP`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgId(String);

impl OrgId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for OrgId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for OrgId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Redemption state of a note. Only ever moves `NotRedeemed` -> `Redeemed`.
///
/// Stored as the strings `"False"` / `"True"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedeemStatus {
    #[default]
    #[serde(rename = "False", alias = "NotRedeemed")]
    NotRedeemed,
    #[serde(rename = "True", alias = "Redeemed")]
    Redeemed,
}

/// Private debt note record, held in exactly one org's private scope.
///
/// Decoded from stored bytes for checks only. The bytes themselves are what
/// the vault holds and what anchors commit to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebtNote {
    pub id: String,
    /// Org that owes the debt. Only this org may create or redeem the note.
    pub debtor_org: OrgId,
    pub amount: u64,
    pub redeem_status: RedeemStatus,
    pub object_type: Option<String>,
}

impl DebtNote {
    pub fn is_redeemed(&self) -> bool {
        self.redeem_status == RedeemStatus::Redeemed
    }

    /// Flip the note to `Redeemed`.
    ///
    /// Fails with `Conflict` if it already is.
    pub fn redeem(&mut self) -> Result<(), DebtNoteError> {
        if self.is_redeemed() {
            return Err(DebtNoteError::conflict(format!(
                "debt note {} has already been redeemed",
                self.id
            )));
        }
        self.redeem_status = RedeemStatus::Redeemed;
        Ok(())
    }
}

/// Instruction to move a note into another org's private scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOrder {
    pub id: String,
    pub new_owner_org: OrgId,
}

/// Payload naming a note by id only (delete, redeem).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRef {
    pub id: String,
}

/// The operations a caller can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateDebtNote,
    DeleteDebtNote,
    TransferDebtNote,
    RedeemDebtNote,
    GetDebtNote,
    GetDebtNoteHash,
    ReadWorldState,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Self::CreateDebtNote,
        Self::DeleteDebtNote,
        Self::TransferDebtNote,
        Self::RedeemDebtNote,
        Self::GetDebtNote,
        Self::GetDebtNoteHash,
        Self::ReadWorldState,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateDebtNote => "CreateDebtNote",
            Self::DeleteDebtNote => "DeleteDebtNote",
            Self::TransferDebtNote => "TransferDebtNote",
            Self::RedeemDebtNote => "RedeemDebtNote",
            Self::GetDebtNote => "GetDebtNote",
            Self::GetDebtNoteHash => "GetDebtNoteHash",
            Self::ReadWorldState => "ReadWorldState",
        }
    }

    /// Number of plain string arguments the operation takes.
    /// Private inputs travel in transient fields and are not counted.
    pub fn arity(&self) -> usize {
        match self {
            Self::CreateDebtNote
            | Self::DeleteDebtNote
            | Self::TransferDebtNote
            | Self::RedeemDebtNote => 0,
            Self::GetDebtNote | Self::ReadWorldState => 1,
            Self::GetDebtNoteHash => 2,
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Self::GetDebtNote | Self::GetDebtNoteHash | Self::ReadWorldState
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = DebtNoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| DebtNoteError::validation(format!("unknown function: {s}")))
    }
}
