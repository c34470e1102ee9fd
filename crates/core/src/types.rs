/// Provider-assigned identifier; the natural key of every synced record.
pub type TmdbId = i64;

/// 1-based source page number. Page 0 means "nothing fetched yet".
pub type PageNumber = u32;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
