//! Downstream collection names and the fields the bridge relies on.

pub const FILMS: &str = "films";
pub const TV_SHOWS: &str = "tv-shows";
pub const GENRES: &str = "genre-tv-shows";
pub const FILM_RECOMMENDATIONS: &str = "recommendation-films";
pub const TV_SHOW_RECOMMENDATIONS: &str = "recommendation-tv-shows";
pub const CONFIGURATIONS: &str = "configurations";

/// Cursor stamp written on catalog records.
pub const PAGE_FETCHED_FROM: &str = "page_fetched_from";
