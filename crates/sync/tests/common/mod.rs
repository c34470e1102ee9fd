#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use reelsync_core::catalog::SourcePage;
use reelsync_core::configuration::ConfigurationSnapshot;
use reelsync_core::cursor::natural_key;
use reelsync_core::types::{PageNumber, TmdbId};
use reelsync_core::{Service, SyncError};
use reelsync_sync::{CatalogSource, RecordStore};

// ---------------------------------------------------------------------------
// Provider double
// ---------------------------------------------------------------------------

#[derive(Default)]
struct SourceState {
    pages: HashMap<(String, PageNumber), Result<Value, SyncError>>,
    resources: HashMap<String, Result<Value, SyncError>>,
    requests: Vec<String>,
}

/// In-memory provider. Unknown pages come back empty; unknown resources
/// answer 404.
#[derive(Clone, Default)]
pub struct FakeSource {
    state: Arc<Mutex<SourceState>>,
    latency: Duration,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request sleeps for `latency` before answering.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub fn page(&self, path: &str, page: PageNumber, body: Value) {
        self.state
            .lock()
            .unwrap()
            .pages
            .insert((path.to_string(), page), Ok(body));
    }

    pub fn failing_page(&self, path: &str, page: PageNumber, error: SyncError) {
        self.state
            .lock()
            .unwrap()
            .pages
            .insert((path.to_string(), page), Err(error));
    }

    pub fn resource(&self, path: &str, body: Value) {
        self.state
            .lock()
            .unwrap()
            .resources
            .insert(path.to_string(), Ok(body));
    }

    /// Requests served so far, as `path?page=N` or `path`.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    async fn wait(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn answer_page(&self, path: &str, page: PageNumber) -> Result<Value, SyncError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(format!("{path}?page={page}"));
        state
            .pages
            .get(&(path.to_string(), page))
            .cloned()
            .unwrap_or_else(|| Ok(json!({"page": page, "results": [], "total_pages": 0})))
    }

    fn answer_resource(&self, path: &str) -> Result<Value, SyncError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(path.to_string());
        state.resources.get(path).cloned().unwrap_or_else(|| {
            Err(SyncError::UpstreamStatus {
                service: Service::Provider,
                status: 404,
                body: "not found".to_string(),
            })
        })
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, SyncError> {
    serde_json::from_value(body).map_err(|e| SyncError::Decode {
        service: Service::Provider,
        message: e.to_string(),
    })
}

impl CatalogSource for FakeSource {
    async fn fetch_page<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        page: PageNumber,
    ) -> Result<SourcePage<T>, SyncError> {
        self.wait().await;
        decode(self.answer_page(path, page)?)
    }

    async fn fetch<T: DeserializeOwned + Send>(&self, path: &str) -> Result<T, SyncError> {
        self.wait().await;
        decode(self.answer_resource(path)?)
    }

    async fn fetch_configuration(&self) -> Result<ConfigurationSnapshot, SyncError> {
        self.wait().await;
        decode(self.answer_resource("/configuration")?)
    }
}

// ---------------------------------------------------------------------------
// Store double
// ---------------------------------------------------------------------------

#[derive(Default)]
struct StoreState {
    collections: HashMap<String, Vec<Value>>,
    failing_creates: Vec<(String, TmdbId)>,
    failing_latest: bool,
    calls: Vec<String>,
    next_document: u64,
}

/// In-memory content store with a call log.
#[derive(Clone, Default)]
pub struct FakeStore {
    state: Arc<Mutex<StoreState>>,
    latency: Duration,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existence checks sleep for `latency` before answering.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// Insert records directly, bypassing the call log.
    pub fn seed(&self, collection: &str, records: Vec<Value>) {
        let mut state = self.state.lock().unwrap();
        for mut record in records {
            state.next_document += 1;
            if record.get("documentId").is_none() {
                record["documentId"] = json!(format!("seed-{}", state.next_document));
            }
            state
                .collections
                .entry(collection.to_string())
                .or_default()
                .push(record);
        }
    }

    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Creates whose `field` equals `id` are refused with a 500.
    pub fn fail_create(&self, field: &str, id: TmdbId) {
        self.state
            .lock()
            .unwrap()
            .failing_creates
            .push((field.to_string(), id));
    }

    pub fn fail_latest(&self) {
        self.state.lock().unwrap().failing_latest = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls starting with `prefix`, e.g. `"create films"`.
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

fn store_error(status: u16) -> SyncError {
    SyncError::UpstreamStatus {
        service: Service::Store,
        status,
        body: "internal error".to_string(),
    }
}

fn sort_key(record: &Value, field: &str) -> i64 {
    natural_key(record, field).unwrap_or(i64::MIN)
}

fn matches_filter(record: &Value, field: &str, value: &str) -> bool {
    match record.get(field) {
        Some(Value::String(s)) => s == value,
        Some(Value::Number(n)) => n.to_string() == value,
        _ => false,
    }
}

impl RecordStore for FakeStore {
    async fn exists(
        &self,
        collection: &str,
        key_field: &str,
        id: TmdbId,
    ) -> Result<bool, SyncError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("exists {collection} {id}"));
        Ok(state
            .collections
            .get(collection)
            .is_some_and(|records| {
                records
                    .iter()
                    .any(|r| natural_key(r, key_field) == Some(id))
            }))
    }

    async fn latest(&self, collection: &str, field: &str) -> Result<Option<Value>, SyncError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("latest {collection}"));
        if state.failing_latest {
            return Err(store_error(500));
        }
        Ok(state.collections.get(collection).and_then(|records| {
            records
                .iter()
                .filter(|r| r.get(field).is_some())
                .max_by_key(|r| sort_key(r, field))
                .cloned()
        }))
    }

    async fn list(
        &self,
        collection: &str,
        filter: Option<(&str, &str)>,
    ) -> Result<Vec<Value>, SyncError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("list {collection}"));
        let records = state.collections.get(collection).cloned().unwrap_or_default();
        Ok(match filter {
            Some((field, value)) => records
                .into_iter()
                .filter(|r| matches_filter(r, field, value))
                .collect(),
            None => records,
        })
    }

    async fn create(&self, collection: &str, record: &Value) -> Result<(), SyncError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("create {collection}"));

        let refused = state
            .failing_creates
            .iter()
            .any(|(field, id)| natural_key(record, field) == Some(*id));
        if refused {
            return Err(store_error(500));
        }

        state.next_document += 1;
        let mut stored = record.clone();
        stored["documentId"] = json!(format!("doc-{}", state.next_document));
        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(stored);
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        document_id: &str,
        record: &Value,
    ) -> Result<(), SyncError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("update {collection} {document_id}"));

        let target = state
            .collections
            .get_mut(collection)
            .and_then(|records| {
                records
                    .iter_mut()
                    .find(|r| r["documentId"] == document_id)
            })
            .ok_or_else(|| store_error(404))?;

        let mut replaced = record.clone();
        replaced["documentId"] = json!(document_id);
        *target = replaced;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn movie(id: TmdbId) -> Value {
    json!({
        "id": id,
        "adult": false,
        "backdrop_path": format!("/b{id}.jpg"),
        "original_title": format!("Original {id}"),
        "original_language": "en",
        "overview": null,
        "poster_path": format!("/p{id}.jpg"),
        "release_date": "2024-01-01",
        "title": format!("Movie {id}"),
        "video": false,
        "vote_average": 7.5,
        "vote_count": 100,
        "popularity": 12.5,
        "genre_ids": [28, 12]
    })
}

pub fn tv_show(id: TmdbId) -> Value {
    json!({
        "id": id,
        "name": format!("Show {id}"),
        "original_name": format!("Original show {id}"),
        "first_air_date": "2020-09-01",
        "origin_country": ["FR"],
        "genre_ids": [18]
    })
}

/// A paginated provider envelope.
pub fn envelope(page: PageNumber, results: Vec<Value>, total_pages: PageNumber) -> Value {
    json!({
        "page": page,
        "results": results,
        "total_pages": total_pages,
        "total_results": results.len()
    })
}

pub fn movie_page(page: PageNumber, ids: impl IntoIterator<Item = TmdbId>) -> Value {
    envelope(page, ids.into_iter().map(movie).collect(), 500)
}

pub fn recommendation_page(page: PageNumber, ids: &[TmdbId], total_pages: PageNumber) -> Value {
    envelope(
        page,
        ids.iter().map(|id| json!({"id": id, "title": "x"})).collect(),
        total_pages,
    )
}

pub fn provider_configuration() -> Value {
    json!({
        "images": {
            "base_url": "http://image.tmdb.org/t/p/",
            "secure_base_url": "https://image.tmdb.org/t/p/",
            "backdrop_sizes": ["w300", "w780", "w1280", "original"],
            "logo_sizes": ["w45", "w92", "original"],
            "poster_sizes": ["w92", "w154", "w185", "original"],
            "profile_sizes": ["w45", "w185", "h632", "original"],
            "still_sizes": ["w92", "w185", "w300", "original"]
        },
        "change_keys": ["adult", "air_date", "also_known_as"]
    })
}

pub fn provider_error(status: u16) -> SyncError {
    SyncError::UpstreamStatus {
        service: Service::Provider,
        status,
        body: "boom".to_string(),
    }
}
