//! # Service Configuration
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | `CORE_PEER_LOCALMSPID` | required | Org of the executing node |
//! | `DN_TRANSFER_POLICY` | `copy` | `copy` keeps the source copy, `move` deletes it |

use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::NodeIdentity;

/// Environment variable holding the executing node's org (MSP id).
pub const NODE_MSPID_ENV: &str = "CORE_PEER_LOCALMSPID";

/// Environment variable selecting the transfer policy.
pub const TRANSFER_POLICY_ENV: &str = "DN_TRANSFER_POLICY";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("invalid value {value:?} for {var}")]
    InvalidValue { var: &'static str, value: String },
}

/// How `TransferDebtNote` treats the sender's copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransferPolicy {
    /// Write the record into the new owner's scope only. The sender keeps its
    /// copy until it deletes it separately, and the caller is not checked
    /// against the current holder.
    #[default]
    CopyOnly,
    /// The caller must be the current holder on its own node; the sender's
    /// copy is deleted in the same write set as the new owner's insert.
    Move,
}

impl fmt::Display for TransferPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CopyOnly => f.write_str("copy"),
            Self::Move => f.write_str("move"),
        }
    }
}

impl FromStr for TransferPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "copy" | "copy-only" | "copy_only" => Ok(Self::CopyOnly),
            "move" => Ok(Self::Move),
            _ => Err(ConfigError::InvalidValue {
                var: TRANSFER_POLICY_ENV,
                value: s.to_string(),
            }),
        }
    }
}

/// Debt note service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    pub transfer_policy: TransferPolicy,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let transfer_policy = match lookup(TRANSFER_POLICY_ENV) {
            Some(value) => value.parse()?,
            None => TransferPolicy::default(),
        };
        Ok(Self { transfer_policy })
    }

    pub fn with_transfer_policy(mut self, policy: TransferPolicy) -> Self {
        self.transfer_policy = policy;
        self
    }
}

impl NodeIdentity {
    /// Identity of this node from `CORE_PEER_LOCALMSPID`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(NODE_MSPID_ENV) {
            Some(org) if !org.trim().is_empty() => Ok(Self::new(org.trim().to_string())),
            Some(org) => Err(ConfigError::InvalidValue {
                var: NODE_MSPID_ENV,
                value: org,
            }),
            None => Err(ConfigError::MissingVar(NODE_MSPID_ENV)),
        }
    }
}
