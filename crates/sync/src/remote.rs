//! The two remote systems as seen by the sync tasks.
//!
//! Sync tasks are generic over these traits so they run unchanged against
//! the real HTTP clients or against in-memory fakes.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;

use reelsync_core::catalog::SourcePage;
use reelsync_core::configuration::ConfigurationSnapshot;
use reelsync_core::types::{PageNumber, TmdbId};
use reelsync_core::SyncError;
use reelsync_store::StoreClient;
use reelsync_tmdb::TmdbClient;

/// Read side: the metadata provider.
pub trait CatalogSource: Send + Sync + 'static {
    /// Fetch page `page` of the paginated collection at `path`.
    fn fetch_page<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        page: PageNumber,
    ) -> impl Future<Output = Result<SourcePage<T>, SyncError>> + Send;

    /// Fetch a non-paginated resource at `path`.
    fn fetch<T: DeserializeOwned + Send>(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<T, SyncError>> + Send;

    /// Fetch the provider's image configuration.
    fn fetch_configuration(
        &self,
    ) -> impl Future<Output = Result<ConfigurationSnapshot, SyncError>> + Send;
}

/// Write side: the downstream content store.
pub trait RecordStore: Send + Sync + 'static {
    /// Whether `collection` holds a record with `key_field == id`.
    fn exists(
        &self,
        collection: &str,
        key_field: &str,
        id: TmdbId,
    ) -> impl Future<Output = Result<bool, SyncError>> + Send;

    /// The record of `collection` with the highest `field`.
    fn latest(
        &self,
        collection: &str,
        field: &str,
    ) -> impl Future<Output = Result<Option<Value>, SyncError>> + Send;

    /// Records of `collection`, optionally filtered on `field == value`.
    fn list(
        &self,
        collection: &str,
        filter: Option<(&str, &str)>,
    ) -> impl Future<Output = Result<Vec<Value>, SyncError>> + Send;

    fn create(
        &self,
        collection: &str,
        record: &Value,
    ) -> impl Future<Output = Result<(), SyncError>> + Send;

    fn update(
        &self,
        collection: &str,
        document_id: &str,
        record: &Value,
    ) -> impl Future<Output = Result<(), SyncError>> + Send;
}

impl CatalogSource for TmdbClient {
    async fn fetch_page<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        page: PageNumber,
    ) -> Result<SourcePage<T>, SyncError> {
        Ok(TmdbClient::fetch_page(self, path, page).await?)
    }

    async fn fetch<T: DeserializeOwned + Send>(&self, path: &str) -> Result<T, SyncError> {
        Ok(TmdbClient::fetch(self, path).await?)
    }

    async fn fetch_configuration(&self) -> Result<ConfigurationSnapshot, SyncError> {
        Ok(self.configuration().await?)
    }
}

impl RecordStore for StoreClient {
    async fn exists(
        &self,
        collection: &str,
        key_field: &str,
        id: TmdbId,
    ) -> Result<bool, SyncError> {
        let id = id.to_string();
        Ok(StoreClient::exists(self, collection, key_field, &id).await?)
    }

    async fn latest(&self, collection: &str, field: &str) -> Result<Option<Value>, SyncError> {
        Ok(StoreClient::latest(self, collection, field).await?)
    }

    async fn list(
        &self,
        collection: &str,
        filter: Option<(&str, &str)>,
    ) -> Result<Vec<Value>, SyncError> {
        Ok(StoreClient::list(self, collection, filter).await?)
    }

    async fn create(&self, collection: &str, record: &Value) -> Result<(), SyncError> {
        Ok(StoreClient::create(self, collection, record).await?)
    }

    async fn update(
        &self,
        collection: &str,
        document_id: &str,
        record: &Value,
    ) -> Result<(), SyncError> {
        Ok(StoreClient::update(self, collection, document_id, record).await?)
    }
}
