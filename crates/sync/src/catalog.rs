//! Paginated catalog sync: one source page per run.
//!
//! ```text
//! resolve cursor ──> fetch page cursor+1 ──empty──> Exhausted
//!                          │
//!                          └──> per item: exists? skip : create(page stamp)
//! ```
//!
//! The new cursor is never written explicitly; it is the page stamp carried
//! by the records created here.

use std::marker::PhantomData;

use reelsync_core::catalog::{CatalogItem, Movie, SourcePage, TvShow};
use reelsync_core::report::SyncOutcome;
use reelsync_core::{Medium, SyncJob};
use reelsync_store::collections;
use reelsync_tmdb::paths;

use crate::cursor::resolve_cursor;
use crate::items::mirror_items;
use crate::remote::{CatalogSource, RecordStore};

/// Everything that distinguishes one paginated sync from another.
#[derive(Debug)]
pub struct PageSync<T> {
    pub job: SyncJob,
    pub medium: Medium,
    /// Downstream collection receiving the records.
    pub collection: &'static str,
    /// Field holding the provider id, used for existence checks.
    pub key_field: &'static str,
    /// Field holding the page stamp, used to resolve the cursor.
    pub cursor_field: &'static str,
    item: PhantomData<fn() -> T>,
}

pub const MOVIES: PageSync<Movie> = PageSync {
    job: SyncJob::Movies,
    medium: Medium::Movie,
    collection: collections::FILMS,
    key_field: "id_film",
    cursor_field: collections::PAGE_FETCHED_FROM,
    item: PhantomData,
};

pub const TV_SHOWS: PageSync<TvShow> = PageSync {
    job: SyncJob::TvShows,
    medium: Medium::Tv,
    collection: collections::TV_SHOWS,
    key_field: "id_TvShow",
    cursor_field: collections::PAGE_FETCHED_FROM,
    item: PhantomData,
};

impl<T> PageSync<T> {
    pub fn source_path(&self) -> String {
        paths::discover(self.medium)
    }
}

/// Mirror the next unsynced source page into the store.
pub async fn sync_next_page<T, S, R>(source: &S, store: &R, task: &PageSync<T>) -> SyncOutcome
where
    T: CatalogItem,
    S: CatalogSource,
    R: RecordStore,
{
    let cursor = resolve_cursor(store, task.collection, task.cursor_field).await;
    let page = cursor.saturating_add(1);
    tracing::info!(job = %task.job, page, "Fetching source page");

    let fetched: SourcePage<T> = match source.fetch_page(&task.source_path(), page).await {
        Ok(fetched) => fetched,
        Err(e) => {
            tracing::error!(job = %task.job, page, error = %e, "Source page fetch failed");
            return SyncOutcome::Failed {
                error: e.to_string(),
            };
        }
    };

    if fetched.is_exhausted() {
        tracing::info!(job = %task.job, page, "Source exhausted, every page is synced");
        return SyncOutcome::Exhausted { page };
    }

    tracing::info!(
        job = %task.job,
        page,
        items = fetched.results.len(),
        total_pages = fetched.total_pages,
        "Source page fetched"
    );

    let tally = mirror_items(store, task.collection, task.key_field, &fetched.results, page).await;

    if tally.all_succeeded() {
        tracing::info!(
            job = %task.job,
            page,
            items = tally.total(),
            created = tally.created,
            skipped = tally.skipped,
            "Page fully synced"
        );
    } else {
        tracing::warn!(
            job = %task.job,
            page,
            items = tally.total(),
            failed = tally.failed,
            "Page only partially synced"
        );
    }

    SyncOutcome::Completed {
        page: Some(page),
        tally,
    }
}
