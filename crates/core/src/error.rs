use std::fmt;

use serde::Serialize;

/// Which remote system an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    /// The metadata provider (TMDB).
    Provider,
    /// The downstream content store.
    Store,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider => f.write_str("provider"),
            Self::Store => f.write_str("store"),
        }
    }
}

/// Failure taxonomy shared by every sync task.
///
/// None of these terminate the process. They are caught at the smallest
/// enclosing scope (item, sub-page or run) and logged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyncError {
    /// Network, DNS, TLS or timeout failure.
    #[error("{service} transport error: {message}")]
    Transport { service: Service, message: String },

    /// The response body did not have the expected JSON shape.
    #[error("{service} decode error: {message}")]
    Decode { service: Service, message: String },

    /// The remote answered with a non-2xx status.
    #[error("{service} returned HTTP {status}: {body}")]
    UpstreamStatus {
        service: Service,
        status: u16,
        body: String,
    },

    /// A stored cursor value is not an integer.
    #[error("Cursor field '{field}' holds a non-integer value: {value}")]
    CursorParse { field: String, value: String },
}
