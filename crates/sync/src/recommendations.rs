//! Recommendation graph sync.
//!
//! Runs over a secondary dimension: the cursor is the highest base-catalog
//! page whose titles already have recommendation records. Each run takes
//! the titles stored from the next base page, walks every recommendation
//! sub-page of each title and writes one aggregate record per title. A
//! title without recommendations still gets a record with an empty list so
//! the cursor can move past its page.

use serde_json::{json, Value};

use reelsync_core::catalog::{RecommendedTitle, SourcePage};
use reelsync_core::cursor::natural_key;
use reelsync_core::report::{ItemTally, SyncOutcome};
use reelsync_core::types::{PageNumber, TmdbId};
use reelsync_core::{Medium, SyncError, SyncJob};
use reelsync_store::collections;
use reelsync_tmdb::paths;

use crate::cursor::resolve_cursor;
use crate::remote::{CatalogSource, RecordStore};

/// Collections and fields of one recommendation graph.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationSync {
    pub job: SyncJob,
    pub medium: Medium,
    /// Catalog collection the base titles are read from.
    pub base_collection: &'static str,
    pub base_key_field: &'static str,
    /// Collection receiving the aggregate records.
    pub collection: &'static str,
    pub key_field: &'static str,
    /// Field holding the recommended ids.
    pub list_field: &'static str,
    /// Field holding the base page stamp.
    pub cursor_field: &'static str,
}

pub const MOVIE_RECOMMENDATIONS: RecommendationSync = RecommendationSync {
    job: SyncJob::MovieRecommendations,
    medium: Medium::Movie,
    base_collection: collections::FILMS,
    base_key_field: "id_film",
    collection: collections::FILM_RECOMMENDATIONS,
    key_field: "id_film",
    list_field: "id_films_recommendations",
    cursor_field: "page_fetched_from_strapi_film",
};

pub const TV_RECOMMENDATIONS: RecommendationSync = RecommendationSync {
    job: SyncJob::TvRecommendations,
    medium: Medium::Tv,
    base_collection: collections::TV_SHOWS,
    base_key_field: "id_TvShow",
    collection: collections::TV_SHOW_RECOMMENDATIONS,
    key_field: "id_TvShow",
    list_field: "id_TvShow_recommendations",
    cursor_field: "page_fetched_from_strapi_TvShow",
};

impl RecommendationSync {
    pub fn to_record(&self, id: TmdbId, recommended: &[TmdbId], page: PageNumber) -> Value {
        let mut record = serde_json::Map::new();
        record.insert(self.key_field.to_string(), json!(id));
        record.insert(self.list_field.to_string(), json!(recommended));
        record.insert(self.cursor_field.to_string(), json!(page));
        Value::Object(record)
    }
}

/// Write recommendation records for the titles of the next base page.
pub async fn sync_recommendations<S, R>(
    source: &S,
    store: &R,
    task: &RecommendationSync,
) -> SyncOutcome
where
    S: CatalogSource,
    R: RecordStore,
{
    let cursor = resolve_cursor(store, task.collection, task.cursor_field).await;
    let page = cursor.saturating_add(1);
    tracing::info!(job = %task.job, page, "Loading base titles of page");

    let page_filter = page.to_string();
    let base = match store
        .list(
            task.base_collection,
            Some((collections::PAGE_FETCHED_FROM, page_filter.as_str())),
        )
        .await
    {
        Ok(base) => base,
        Err(e) => {
            tracing::error!(job = %task.job, page, error = %e, "Base titles lookup failed");
            return SyncOutcome::Failed {
                error: e.to_string(),
            };
        }
    };

    let base_ids: Vec<TmdbId> = base
        .iter()
        .filter_map(|record| {
            let id = natural_key(record, task.base_key_field);
            if id.is_none() {
                tracing::warn!(job = %task.job, %record, "Base record without a usable id");
            }
            id
        })
        .collect();

    if base_ids.is_empty() {
        tracing::info!(job = %task.job, page, "No base titles stored for this page yet");
        return SyncOutcome::Exhausted { page };
    }

    let mut tally = ItemTally::default();

    for id in base_ids {
        match store.exists(task.collection, task.key_field, id).await {
            Ok(true) => {
                tracing::debug!(id, "Recommendations already stored, skipping");
                tally.skipped += 1;
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(id, error = %e, "Existence check failed");
                tally.failed += 1;
                continue;
            }
        }

        let recommended = match collect_recommendations(source, task.medium, id).await {
            Ok(recommended) => recommended,
            Err(e) => {
                tracing::warn!(id, error = %e, "Recommendations unavailable");
                tally.failed += 1;
                continue;
            }
        };
        if recommended.is_empty() {
            tracing::info!(id, "No recommendations found, storing an empty list");
        }

        let record = task.to_record(id, &recommended, page);
        match store.create(task.collection, &record).await {
            Ok(()) => {
                tracing::info!(id, count = recommended.len(), "Recommendations created");
                tally.created += 1;
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "Recommendation creation failed");
                tally.failed += 1;
            }
        }
    }

    tracing::info!(
        job = %task.job,
        page,
        items = tally.total(),
        created = tally.created,
        skipped = tally.skipped,
        failed = tally.failed,
        "Recommendation page processed"
    );

    SyncOutcome::Completed {
        page: Some(page),
        tally,
    }
}

/// Every recommended id of one title, across all of its sub-pages.
///
/// Stops at the first sub-page that comes back empty. A failing first
/// sub-page is an error; a later failure keeps what was gathered so far.
pub async fn collect_recommendations<S: CatalogSource>(
    source: &S,
    medium: Medium,
    id: TmdbId,
) -> Result<Vec<TmdbId>, SyncError> {
    let path = paths::recommendations(medium, id);
    let mut recommended = Vec::new();
    let mut sub_page: PageNumber = 1;

    loop {
        let fetched: SourcePage<RecommendedTitle> = match source.fetch_page(&path, sub_page).await {
            Ok(fetched) => fetched,
            Err(e) if sub_page == 1 => return Err(e),
            Err(e) => {
                tracing::warn!(
                    id,
                    sub_page,
                    kept = recommended.len(),
                    error = %e,
                    "Recommendation sub-page failed, keeping partial list"
                );
                break;
            }
        };

        if fetched.is_exhausted() {
            break;
        }
        recommended.extend(fetched.results.iter().map(|title| title.id));

        if sub_page >= fetched.total_pages {
            break;
        }
        sub_page += 1;
    }

    Ok(recommended)
}
