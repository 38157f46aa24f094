//! Structured log helpers.
//!
//! Every note event carries the same fields so log queries can join on them:
//! - `note_id`: Debt note identifier
//! - `org`: Organization the event is about (caller or destination)
//!
//! Private payload bytes must never be passed to these macros.

/// Log a debt note event with standard fields.
///
/// ```rust,ignore
/// log_note_event!(info, "Debt note created", note.id, caller_org, amount = note.amount);
/// ```
#[macro_export]
macro_rules! log_note_event {
    ($level:ident, $msg:expr, $note_id:expr, $org:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            note_id = %$note_id,
            org = %$org,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log an anchor publication with standard fields.
#[macro_export]
macro_rules! log_anchor_event {
    ($level:ident, $msg:expr, $anchor_key:expr, $digest:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            anchor_key = %$anchor_key,
            digest = %$digest,
            $($($field)*,)?
            $msg
        )
    };
}
