#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use reelsync_api::app::build_router;
use reelsync_api::config::ServerConfig;
use reelsync_api::state::AppState;
use reelsync_core::report::{SyncOutcome, SyncReport};
use reelsync_core::SyncJob;
use reelsync_sync::{JobStatus, Launcher, RunTicket};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
    }
}

/// Launcher double: records every launch and reports one finished run
/// for each launched job.
#[derive(Default)]
pub struct RecordingLauncher {
    tickets: Mutex<Vec<RunTicket>>,
}

impl RecordingLauncher {
    pub fn launched(&self) -> Vec<SyncJob> {
        self.tickets.lock().unwrap().iter().map(|t| t.job).collect()
    }

    pub fn tickets(&self) -> Vec<RunTicket> {
        self.tickets.lock().unwrap().clone()
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&self, job: SyncJob) -> RunTicket {
        let ticket = RunTicket {
            run_id: Uuid::now_v7(),
            job,
        };
        self.tickets.lock().unwrap().push(ticket);
        ticket
    }

    fn statuses(&self) -> Vec<JobStatus> {
        let tickets = self.tickets();
        SyncJob::ALL
            .iter()
            .map(|&job| JobStatus {
                job,
                running: false,
                queued: 0,
                last_run: tickets.iter().rev().find(|t| t.job == job).map(|t| {
                    let now = Utc::now();
                    SyncReport {
                        run_id: t.run_id,
                        job,
                        started_at: now,
                        finished_at: now,
                        outcome: SyncOutcome::Exhausted { page: 1 },
                    }
                }),
            })
            .collect()
    }
}

/// Build the full application router around `launcher`, with the same
/// middleware stack production uses.
pub fn build_test_app(launcher: Arc<RecordingLauncher>) -> Router {
    let state = AppState {
        config: Arc::new(test_config()),
        launcher,
    };
    build_router(state)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
