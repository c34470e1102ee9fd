use reelsync_core::{Service, SyncError};

/// Errors from the provider REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("TMDB API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body was not the JSON shape we expected.
    #[error("Unexpected TMDB response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<TmdbError> for SyncError {
    fn from(err: TmdbError) -> Self {
        match err {
            TmdbError::Request(e) => SyncError::Transport {
                service: Service::Provider,
                message: e.to_string(),
            },
            TmdbError::Api { status, body } => SyncError::UpstreamStatus {
                service: Service::Provider,
                status,
                body,
            },
            TmdbError::Decode(e) => SyncError::Decode {
                service: Service::Provider,
                message: e.to_string(),
            },
        }
    }
}
