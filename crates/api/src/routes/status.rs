use axum::extract::State;
use axum::{routing::get, Json, Router};
use reelsync_sync::JobStatus;

use crate::state::AppState;

/// GET /status -- one entry per job, including its last finished run.
async fn job_statuses(State(state): State<AppState>) -> Json<Vec<JobStatus>> {
    Json(state.launcher.statuses())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/status", get(job_statuses))
}
