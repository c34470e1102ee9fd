use reelsync_core::{Service, SyncError};

/// Errors from the content-store REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store returned a non-2xx status code.
    #[error("Store API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body was not a `{"data": [...]}` envelope.
    #[error("Unexpected store response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<StoreError> for SyncError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Request(e) => SyncError::Transport {
                service: Service::Store,
                message: e.to_string(),
            },
            StoreError::Api { status, body } => SyncError::UpstreamStatus {
                service: Service::Store,
                status,
                body,
            },
            StoreError::Decode(e) => SyncError::Decode {
                service: Service::Store,
                message: e.to_string(),
            },
        }
    }
}
