//! Reading integers back out of downstream records.
//!
//! The store may serialize big integers as JSON strings, so both numbers and
//! numeric strings are accepted for cursor stamps and natural keys.

use serde_json::Value;

use crate::error::SyncError;
use crate::types::{PageNumber, TmdbId};

/// Read the cursor stamp `field` from a stored record.
///
/// A missing or `null` field reads as page 0. Anything that is not a
/// non-negative integer is a [`SyncError::CursorParse`].
pub fn parse_cursor(record: &Value, field: &str) -> Result<PageNumber, SyncError> {
    let raw = match record.get(field) {
        None | Some(Value::Null) => return Ok(0),
        Some(raw) => raw,
    };

    integer(raw)
        .and_then(|n| PageNumber::try_from(n).ok())
        .ok_or_else(|| SyncError::CursorParse {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// Read the natural key `field` from a stored record, if it holds an integer.
pub fn natural_key(record: &Value, field: &str) -> Option<TmdbId> {
    record.get(field).and_then(integer)
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
