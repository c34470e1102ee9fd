//! REST client for the metadata provider.
//!
//! Every endpoint is addressed by a path relative to the API root (see
//! [`crate::paths`]); the client appends the API key, locale and page
//! parameters and decodes the JSON body.

use serde::de::DeserializeOwned;

use reelsync_core::catalog::SourcePage;
use reelsync_core::configuration::ConfigurationSnapshot;
use reelsync_core::types::PageNumber;

use crate::config::TmdbConfig;
use crate::error::TmdbError;
use crate::paths;

/// HTTP client for the provider API.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: reqwest::Client,
    config: TmdbConfig,
}

impl TmdbClient {
    /// Create a client with its own connection pool and the configured
    /// request timeout.
    pub fn new(config: TmdbConfig) -> Result<Self, TmdbError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: TmdbConfig) -> Self {
        Self { client, config }
    }

    /// Fetch one page of a paginated collection.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: PageNumber,
    ) -> Result<SourcePage<T>, TmdbError> {
        tracing::debug!(path, page, "Fetching provider page");
        self.get(path, &self.query(Some(page), true)).await
    }

    /// Fetch a non-paginated, localized resource such as a genre list.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, TmdbError> {
        tracing::debug!(path, "Fetching provider resource");
        self.get(path, &self.query(None, true)).await
    }

    /// Fetch the provider's image configuration and change keys.
    pub async fn configuration(&self) -> Result<ConfigurationSnapshot, TmdbError> {
        self.get(paths::CONFIGURATION, &self.query(None, false)).await
    }

    /// Query parameters for a request: the API key always, the locale when
    /// `localized`, the page when given.
    pub fn query(&self, page: Option<PageNumber>, localized: bool) -> Vec<(&'static str, String)> {
        let mut params = vec![("api_key", self.config.api_key.clone())];
        if localized {
            params.push(("language", self.config.language.clone()));
        }
        if let Some(page) = page {
            params.push(("page", page.to_string()));
        }
        params
    }

    /// Absolute URL of `path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    // ---- private helpers ----

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, TmdbError> {
        let response = self.client.get(self.url(path)).query(query).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TmdbError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}
