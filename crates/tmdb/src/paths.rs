//! Provider resource paths, relative to the API root.

use reelsync_core::types::TmdbId;
use reelsync_core::Medium;

pub const CONFIGURATION: &str = "/configuration";

/// Paginated discovery listing (`/discover/movie`, `/discover/tv`).
pub fn discover(medium: Medium) -> String {
    format!("/discover/{}", medium.path_segment())
}

/// Full genre list of a medium.
pub fn genre_list(medium: Medium) -> String {
    format!("/genre/{}/list", medium.path_segment())
}

/// Paginated recommendations for one title.
pub fn recommendations(medium: Medium, id: TmdbId) -> String {
    format!("/{}/{}/recommendations", medium.path_segment(), id)
}
