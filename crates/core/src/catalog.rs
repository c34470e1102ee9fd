//! Provider catalog models and their mapping into downstream records.
//!
//! Provider strings are frequently `null`; they decode to `None` here and
//! are written downstream as empty strings. Scalars and lists that come
//! back `null` decode to their default, same as a missing field.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::de::null_as_default;
use crate::types::{PageNumber, TmdbId};

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// One page of a paginated provider collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcePage<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub page: PageNumber,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pages: PageNumber,
}

impl<T> SourcePage<T> {
    /// An empty result list is the end-of-collection signal, whatever
    /// `total_pages` claims.
    pub fn is_exhausted(&self) -> bool {
        self.results.is_empty()
    }
}

/// Envelope of the provider's genre list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// A provider record that can be mirrored into the downstream store.
pub trait CatalogItem: DeserializeOwned + Send + Sync + 'static {
    /// Natural key used for existence checks.
    fn tmdb_id(&self) -> TmdbId;

    /// Human-readable label for log lines.
    fn label(&self) -> &str;

    /// Downstream payload for this item, stamped with the source page that
    /// produced it.
    fn to_record(&self, page: PageNumber) -> Value;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: TmdbId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl CatalogItem for Genre {
    fn tmdb_id(&self) -> TmdbId {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    /// Genre lists are not paginated, so the record carries no page stamp.
    fn to_record(&self, _page: PageNumber) -> Value {
        json!({
            "id_genre": self.id,
            "nom_genre": self.name,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: TmdbId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub adult: bool,
    pub backdrop_path: Option<String>,
    pub original_title: Option<String>,
    pub original_language: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<TmdbId>,
}

impl CatalogItem for Movie {
    fn tmdb_id(&self) -> TmdbId {
        self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn to_record(&self, page: PageNumber) -> Value {
        json!({
            "id_film": self.id,
            "title": self.title,
            "original_title": text(&self.original_title),
            "original_language": text(&self.original_language),
            "overview": text(&self.overview),
            "Backdrop_path": text(&self.backdrop_path),
            "poster_path": text(&self.poster_path),
            "release_date": text(&self.release_date),
            "Video": self.video,
            "vote_average_tmdb": self.vote_average,
            "vote_count_tmdb": self.vote_count,
            "popularity_tmdb": self.popularity,
            "genre_tv_films": self.genre_ids,
            "adult": self.adult,
            "popularity_website": 0.0,
            "vote_average_website": 0.0,
            "vote_count_website": 0.0,
            "page_fetched_from": page,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvShow {
    pub id: TmdbId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub adult: bool,
    pub backdrop_path: Option<String>,
    pub original_name: Option<String>,
    pub original_language: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub first_air_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<TmdbId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin_country: Vec<String>,
}

impl CatalogItem for TvShow {
    fn tmdb_id(&self) -> TmdbId {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn to_record(&self, page: PageNumber) -> Value {
        json!({
            "id_TvShow": self.id,
            "Name": self.name,
            "original_Name": text(&self.original_name),
            "original_language": text(&self.original_language),
            "overview": text(&self.overview),
            "backdrop_path": text(&self.backdrop_path),
            "poster_path": text(&self.poster_path),
            "Origin_country": self.origin_country,
            "first_air_date": air_date(self.first_air_date.as_deref()),
            "vote_average_tmdb": self.vote_average,
            "vote_count_tmdb": self.vote_count,
            "popularity_tmdb": self.popularity,
            "genre_tv_films": self.genre_ids,
            "adult": self.adult,
            "popularity_website": 0.0,
            "vote_average_website": 0.0,
            "vote_count_website": 0.0,
            "page_fetched_from": page,
        })
    }
}

/// Entry of a recommendation sub-page. Only the id is kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendedTitle {
    pub id: TmdbId,
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

/// Keep the `YYYY-MM-DD` prefix of a first-air date; anything shorter than
/// a full date is dropped.
fn air_date(raw: Option<&str>) -> &str {
    match raw {
        Some(date) if date.len() >= 10 => date.get(..10).unwrap_or_default(),
        _ => "",
    }
}
