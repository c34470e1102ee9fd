//! REST client for the downstream content store.
//!
//! The store is treated as a set of REST collections supporting filtered
//! GET, sorted/limited GET, POST and PUT. Bodies are wrapped in a
//! `{"data": ...}` envelope and every request carries the bearer token.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::query;

/// HTTP client for the content store.
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: reqwest::Client,
    config: StoreConfig,
}

/// `{"data": [...]}` list envelope.
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    data: Vec<Value>,
}

impl StoreClient {
    /// Create a client with its own connection pool and the configured
    /// request timeout.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: StoreConfig) -> Self {
        Self { client, config }
    }

    /// Whether a record with `key_field == id` exists in `collection`.
    pub async fn exists(
        &self,
        collection: &str,
        key_field: &str,
        id: &str,
    ) -> Result<bool, StoreError> {
        let records = self
            .get_list(collection, &[query::eq_filter(key_field, id)])
            .await?;
        Ok(!records.is_empty())
    }

    /// The record with the highest `field`, if the collection is not empty.
    pub async fn latest(
        &self,
        collection: &str,
        field: &str,
    ) -> Result<Option<Value>, StoreError> {
        let records = self.get_list(collection, &query::latest_by(field)).await?;
        Ok(records.into_iter().next())
    }

    /// Records of `collection`, optionally restricted to `field == value`.
    pub async fn list(
        &self,
        collection: &str,
        filter: Option<(&str, &str)>,
    ) -> Result<Vec<Value>, StoreError> {
        self.get_list(collection, &query::list(filter)).await
    }

    /// Create a record.
    pub async fn create(&self, collection: &str, record: &Value) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.collection_url(collection))
            .bearer_auth(&self.config.token)
            .json(&json!({ "data": record }))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Replace the record addressed by `document_id`.
    pub async fn update(
        &self,
        collection: &str,
        document_id: &str,
        record: &Value,
    ) -> Result<(), StoreError> {
        let response = self
            .client
            .put(format!("{}/{}", self.collection_url(collection), document_id))
            .bearer_auth(&self.config.token)
            .json(&json!({ "data": record }))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// `{base_url}/api/{collection}`
    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/api/{}", self.config.base_url, collection)
    }

    // ---- private helpers ----

    async fn get_list(
        &self,
        collection: &str,
        params: &[(String, String)],
    ) -> Result<Vec<Value>, StoreError> {
        let response = self
            .client
            .get(self.collection_url(collection))
            .bearer_auth(&self.config.token)
            .query(params)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        let envelope: ListEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.data)
    }

    /// Return the response unchanged on a 2xx status, otherwise a
    /// [`StoreError::Api`] carrying the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), StoreError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
