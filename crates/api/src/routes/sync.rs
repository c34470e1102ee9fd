//! Manual sync triggers.
//!
//! Every route launches its jobs in the background and acknowledges at
//! once with a plain-text body. Outcomes land in `/status` and the logs.

use axum::extract::State;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};
use reelsync_core::SyncJob;

use crate::state::AppState;

/// Response header carrying the ids of the launched runs, comma-separated.
pub const RUN_ID_HEADER: &str = "x-sync-run-id";

fn trigger(state: &AppState, jobs: &[SyncJob], body: &'static str) -> Response {
    let run_ids: Vec<String> = jobs
        .iter()
        .map(|&job| {
            let ticket = state.launcher.launch(job);
            tracing::info!(%job, run_id = %ticket.run_id, "Sync triggered over HTTP");
            ticket.run_id.to_string()
        })
        .collect();

    let mut response = body.into_response();
    if let Ok(value) = HeaderValue::from_str(&run_ids.join(",")) {
        response.headers_mut().insert(RUN_ID_HEADER, value);
    }
    response
}

/// GET /Genre
async fn sync_genres(State(state): State<AppState>) -> Response {
    trigger(
        &state,
        &[SyncJob::MovieGenres, SyncJob::TvGenres],
        "Sync triggered",
    )
}

/// GET /Films
async fn sync_movies(State(state): State<AppState>) -> Response {
    trigger(&state, &[SyncJob::Movies], "SyncMovies triggered")
}

/// GET /TvShows
async fn sync_tv_shows(State(state): State<AppState>) -> Response {
    trigger(&state, &[SyncJob::TvShows], "SyncTvShows triggered")
}

/// GET /FilmRecommendations
async fn sync_movie_recommendations(State(state): State<AppState>) -> Response {
    trigger(
        &state,
        &[SyncJob::MovieRecommendations],
        "SyncFilmsRecommendation triggered",
    )
}

/// GET /TvShowsRecommendations
async fn sync_tv_recommendations(State(state): State<AppState>) -> Response {
    trigger(
        &state,
        &[SyncJob::TvRecommendations],
        "SyncTvShowsRecommendation triggered",
    )
}

/// GET /Configurations
async fn sync_configuration(State(state): State<AppState>) -> Response {
    trigger(
        &state,
        &[SyncJob::Configuration],
        "SyncConfiguration triggered",
    )
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/Genre", get(sync_genres))
        .route("/Films", get(sync_movies))
        .route("/TvShows", get(sync_tv_shows))
        .route("/FilmRecommendations", get(sync_movie_recommendations))
        .route("/TvShowsRecommendations", get(sync_tv_recommendations))
        .route("/Configurations", get(sync_configuration))
}
