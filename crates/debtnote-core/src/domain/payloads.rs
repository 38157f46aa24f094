//! # Payload Decoding
//!
//! Private inputs arrive as JSON byte blobs in transient fields. Each blob is
//! decoded into a wire struct where every field is optional, then validated
//! once into a typed domain value. Nothing downstream sees the wire structs.
//!
//! Both the current field names (`id`, `debtorOrg`, `amount`) and the names
//! used by earlier clients (`debtNoteID`, `debtyOrg`, `debt`) are accepted.
//! Earlier clients sent `debt` as a decimal string, so it may be a string or
//! a number; `amount` must be a number.

use serde::Deserialize;

use super::{DebtNote, DebtNoteError, NoteRef, OrgId, RedeemStatus, TransferOrder};

/// Stored key of the redemption flag.
const REDEEM_STATUS_FIELD: &str = "redeemStatus";

/// Transient field names carrying private inputs.
pub mod transient_keys {
    /// Full note record for `CreateDebtNote`, note reference for `DeleteDebtNote`.
    pub const PROPERTIES: &str = "debtnote_properties";
    /// Transfer order `{id, newOwnerOrg}` for `TransferDebtNote`.
    pub const NEW_OWNER: &str = "debtnote_new_owner";
    /// Full note record as the new owner will hold it.
    pub const NEW_PROPERTIES: &str = "debtnote_newproperties";
    /// Note reference for `RedeemDebtNote`.
    pub const REDEEM: &str = "debtnote_redeem";
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebtNoteWire {
    #[serde(default, alias = "debtNoteID")]
    id: Option<String>,
    #[serde(default, alias = "debtyOrg")]
    debtor_org: Option<String>,
    #[serde(default)]
    amount: Option<u64>,
    #[serde(default)]
    debt: Option<LegacyAmount>,
    #[serde(default)]
    redeem_status: Option<RedeemStatus>,
    #[serde(default)]
    object_type: Option<String>,
}

/// The `debt` field of earlier clients.
#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyAmount {
    Number(u64),
    Text(String),
}

impl LegacyAmount {
    fn value(self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferOrderWire {
    #[serde(default, alias = "debtNoteID")]
    id: Option<String>,
    #[serde(default)]
    new_owner_org: Option<String>,
}

#[derive(Deserialize)]
struct NoteRefWire {
    #[serde(default, alias = "debtNoteID")]
    id: Option<String>,
}

fn parse<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T, DebtNoteError> {
    serde_json::from_slice(bytes)
        .map_err(|e| DebtNoteError::validation(format!("failed to unmarshal JSON: {e}")))
}

fn required(value: Option<String>, field: &str) -> Result<String, DebtNoteError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DebtNoteError::validation(format!(
            "{field} field must be a non-empty string"
        ))),
    }
}

/// Decode a full note record.
///
/// `debtorOrg` is left as given (possibly empty); whether it matches the
/// caller is an authorization question, not a validation one.
pub fn decode_debt_note(bytes: &[u8]) -> Result<DebtNote, DebtNoteError> {
    let wire: DebtNoteWire = parse(bytes)?;

    let id = required(wire.id, "id")?;
    let amount = match wire.amount.or_else(|| wire.debt.and_then(LegacyAmount::value)) {
        Some(amount) if amount > 0 => amount,
        _ => {
            return Err(DebtNoteError::validation(
                "amount field must be greater than zero",
            ))
        }
    };

    Ok(DebtNote {
        id,
        debtor_org: OrgId::new(wire.debtor_org.unwrap_or_default()),
        amount,
        redeem_status: wire.redeem_status.unwrap_or_default(),
        object_type: wire.object_type,
    })
}

/// Decode a record submitted for creation: as [`decode_debt_note`], and the
/// note must not already be redeemed.
pub fn decode_new_debt_note(bytes: &[u8]) -> Result<DebtNote, DebtNoteError> {
    let note = decode_debt_note(bytes)?;
    if note.is_redeemed() {
        return Err(DebtNoteError::validation(format!(
            "debt note {} cannot be created in redeemed state",
            note.id
        )));
    }
    Ok(note)
}

/// Rewrite a stored record with `redeemStatus` set to redeemed.
///
/// Only that field changes: any other fields and their key names stay as
/// stored.
pub fn mark_redeemed(bytes: &[u8]) -> Result<Vec<u8>, DebtNoteError> {
    let mut record: serde_json::Map<String, serde_json::Value> = parse(bytes)?;
    let status = serde_json::to_value(RedeemStatus::Redeemed)
        .map_err(|e| DebtNoteError::validation(format!("failed to encode status: {e}")))?;
    record.insert(REDEEM_STATUS_FIELD.to_string(), status);
    serde_json::to_vec(&record)
        .map_err(|e| DebtNoteError::validation(format!("failed to encode debt note: {e}")))
}

pub fn decode_transfer_order(bytes: &[u8]) -> Result<TransferOrder, DebtNoteError> {
    let wire: TransferOrderWire = parse(bytes)?;
    Ok(TransferOrder {
        id: required(wire.id, "id")?,
        new_owner_org: OrgId::new(required(wire.new_owner_org, "newOwnerOrg")?),
    })
}

pub fn decode_note_ref(bytes: &[u8]) -> Result<NoteRef, DebtNoteError> {
    let wire: NoteRefWire = parse(bytes)?;
    Ok(NoteRef {
        id: required(wire.id, "id")?,
    })
}
