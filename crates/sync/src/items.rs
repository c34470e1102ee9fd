use reelsync_core::catalog::CatalogItem;
use reelsync_core::report::ItemTally;
use reelsync_core::types::PageNumber;

use crate::remote::RecordStore;

/// Create every item of `items` that `collection` does not hold yet.
///
/// Items are handled independently: a failed existence check or create is
/// logged, counted, and the loop moves on to the next item.
pub(crate) async fn mirror_items<R, T>(
    store: &R,
    collection: &str,
    key_field: &str,
    items: &[T],
    page: PageNumber,
) -> ItemTally
where
    R: RecordStore,
    T: CatalogItem,
{
    let mut tally = ItemTally::default();

    for item in items {
        let id = item.tmdb_id();
        let label = item.label();

        match store.exists(collection, key_field, id).await {
            Ok(true) => {
                tracing::debug!(id, label, "Already stored, skipping");
                tally.skipped += 1;
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(id, label, error = %e, "Existence check failed");
                tally.failed += 1;
                continue;
            }
        }

        match store.create(collection, &item.to_record(page)).await {
            Ok(()) => {
                tracing::info!(id, label, "Record created");
                tally.created += 1;
            }
            Err(e) => {
                tracing::warn!(id, label, error = %e, "Record creation failed");
                tally.failed += 1;
            }
        }
    }

    tally
}
