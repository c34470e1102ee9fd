//! Entity kinds and the sync job that owns each of them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of the catalog an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Medium {
    Movie,
    Tv,
}

impl Medium {
    /// Path segment the provider uses for this medium (`movie` / `tv`).
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

/// One independently schedulable sync task.
///
/// Each job owns exactly one downstream collection (the two genre jobs
/// share the genre collection and never run at the same time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncJob {
    MovieGenres,
    TvGenres,
    Movies,
    TvShows,
    MovieRecommendations,
    TvRecommendations,
    Configuration,
}

impl SyncJob {
    /// Every job, in a stable order.
    pub const ALL: [SyncJob; 7] = [
        SyncJob::MovieGenres,
        SyncJob::TvGenres,
        SyncJob::Movies,
        SyncJob::TvShows,
        SyncJob::MovieRecommendations,
        SyncJob::TvRecommendations,
        SyncJob::Configuration,
    ];

    /// Stable snake_case name used in logs and the status endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MovieGenres => "movie_genres",
            Self::TvGenres => "tv_genres",
            Self::Movies => "movies",
            Self::TvShows => "tv_shows",
            Self::MovieRecommendations => "movie_recommendations",
            Self::TvRecommendations => "tv_recommendations",
            Self::Configuration => "configuration",
        }
    }
}

impl fmt::Display for SyncJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
