use std::time::Duration;

/// Default provider API root.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Locale requested for titles, overviews and genre names.
pub const DEFAULT_LANGUAGE: &str = "fr-FR";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the metadata provider.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// API key sent as the `api_key` query parameter.
    pub api_key: String,
    /// API root without trailing slash.
    pub base_url: String,
    /// Value of the `language` query parameter.
    pub language: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Variable                   | Required | Default                        |
    /// |----------------------------|----------|--------------------------------|
    /// | `TMDB_API_KEY` / `API_KEY` | yes      | -                              |
    /// | `TMDB_BASE_URL`            | no       | `https://api.themoviedb.org/3` |
    /// | `TMDB_LANGUAGE`            | no       | `fr-FR`                        |
    /// | `HTTP_CLIENT_TIMEOUT_SECS` | no       | `30`                           |
    pub fn from_env() -> Self {
        let api_key = std::env::var("TMDB_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .expect("TMDB_API_KEY (or API_KEY) must be set");

        let base_url = std::env::var("TMDB_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let language =
            std::env::var("TMDB_LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string());

        let timeout_secs: u64 = std::env::var("HTTP_CLIENT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_key,
            base_url,
            language,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
