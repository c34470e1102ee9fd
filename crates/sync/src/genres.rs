//! Genre list sync. Movie and TV genres share one downstream collection.

use reelsync_core::catalog::GenreList;
use reelsync_core::report::SyncOutcome;
use reelsync_core::Medium;
use reelsync_store::collections;
use reelsync_tmdb::paths;

use crate::items::mirror_items;
use crate::remote::{CatalogSource, RecordStore};

/// Natural key of the genre collection.
pub const GENRE_KEY: &str = "id_genre";

/// Create every genre of `medium` missing from the genre collection.
pub async fn sync_genres<S, R>(source: &S, store: &R, medium: Medium) -> SyncOutcome
where
    S: CatalogSource,
    R: RecordStore,
{
    let started = std::time::Instant::now();

    let list: GenreList = match source.fetch(&paths::genre_list(medium)).await {
        Ok(list) => list,
        Err(e) => {
            tracing::error!(?medium, error = %e, "Genre list fetch failed");
            return SyncOutcome::Failed {
                error: e.to_string(),
            };
        }
    };
    tracing::info!(?medium, count = list.genres.len(), "Genre list fetched");

    // Genre lists are not paginated; page 0 is never written.
    let tally = mirror_items(store, collections::GENRES, GENRE_KEY, &list.genres, 0).await;

    tracing::info!(
        ?medium,
        items = tally.total(),
        created = tally.created,
        skipped = tally.skipped,
        failed = tally.failed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Genre sync complete"
    );

    SyncOutcome::Completed { page: None, tally }
}
