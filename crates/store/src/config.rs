use std::time::Duration;

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the downstream content store.
#[derive(Clone)]
pub struct StoreConfig {
    /// Store root, e.g. `https://cms.example.com`. Collections live under
    /// `{base_url}/api/{collection}`.
    pub base_url: String,
    /// Bearer credential attached to every request.
    pub token: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Variable                   | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `STRAPI_URL`               | yes      | -       |
    /// | `STRAPI_TOKEN`             | yes      | -       |
    /// | `HTTP_CLIENT_TIMEOUT_SECS` | no       | `30`    |
    pub fn from_env() -> Self {
        let base_url = std::env::var("STRAPI_URL").expect("STRAPI_URL must be set");
        let token = std::env::var("STRAPI_TOKEN").expect("STRAPI_TOKEN must be set");

        let timeout_secs: u64 = std::env::var("HTTP_CLIENT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            timeout: Duration::from_secs(timeout_secs),
            ..Self::new(base_url, token)
        }
    }
}

// The token must never end up in logs.
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
