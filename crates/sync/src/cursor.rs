//! Cursor resolution.
//!
//! The bridge keeps no offset store of its own: the cursor of a collection
//! is the highest page stamp already written into it. Any failure to read
//! that stamp restarts pagination at page 1, which is safe because record
//! creation is guarded by an existence check.

use reelsync_core::cursor::parse_cursor;
use reelsync_core::types::PageNumber;

use crate::remote::RecordStore;

/// Highest value of `cursor_field` stored in `collection`, or 0.
pub async fn resolve_cursor<R: RecordStore>(
    store: &R,
    collection: &str,
    cursor_field: &str,
) -> PageNumber {
    let latest = match store.latest(collection, cursor_field).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            tracing::info!(collection, "Collection is empty, starting from the first page");
            return 0;
        }
        Err(e) => {
            tracing::warn!(collection, error = %e, "Cursor lookup failed, starting from the first page");
            return 0;
        }
    };

    match parse_cursor(&latest, cursor_field) {
        Ok(page) => {
            tracing::info!(collection, cursor_field, last_page = page, "Resolved cursor");
            page
        }
        Err(e) => {
            tracing::warn!(collection, error = %e, "Unreadable cursor, starting from the first page");
            0
        }
    }
}
