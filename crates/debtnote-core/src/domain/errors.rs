use thiserror::Error;

/// Failure of a debt note operation.
///
/// Every variant is an expected outcome the caller must handle; none of them
/// leaves partial state behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DebtNoteError {
    /// Malformed or missing input field.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Caller org mismatch, ownership mismatch or cross-org access.
    #[error("not authorized: {0}")]
    Authorization(String),

    /// Expected record or anchor is absent.
    #[error("{0} does not exist")]
    NotFound(String),

    /// Duplicate creation, double redemption or a conflicting concurrent write.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Backend failure reported by a store port.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Category of a [`DebtNoteError`], for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Authorization,
    NotFound,
    Conflict,
    Storage,
}

impl ErrorKind {
    /// Lower-case label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Authorization => "authorization",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Storage => "storage",
        }
    }
}

impl DebtNoteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn authorization(msg: impl Into<String>) -> Self {
        Self::Authorization(msg.into())
    }

    pub(crate) fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub(crate) fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
