//! Job runner.
//!
//! Owns both remote clients and executes sync jobs on request. Runs of the
//! same job never overlap: a trigger arriving while that job is busy waits
//! in line (FIFO) behind the current run. Jobs writing the same collection
//! share one gate; all other jobs run concurrently.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use reelsync_core::report::{SyncOutcome, SyncReport};
use reelsync_core::{Medium, SyncJob};

use crate::catalog::{self, sync_next_page};
use crate::configuration::sync_configuration;
use crate::genres::sync_genres;
use crate::recommendations::{self, sync_recommendations};
use crate::remote::{CatalogSource, RecordStore};

/// Handle returned when a job is accepted for background execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunTicket {
    pub run_id: Uuid,
    pub job: SyncJob,
}

/// Snapshot of one job for the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct JobStatus {
    pub job: SyncJob,
    pub running: bool,
    /// Runs waiting for the current one to finish.
    pub queued: usize,
    pub last_run: Option<SyncReport>,
}

/// Fire-and-forget job submission.
///
/// Object safe so the HTTP layer and the scheduler can hold it as
/// `Arc<dyn Launcher>` and be tested with a recording double.
pub trait Launcher: Send + Sync + 'static {
    /// Start `job` in the background and return immediately.
    fn launch(&self, job: SyncJob) -> RunTicket;

    /// Current state of every job.
    fn statuses(&self) -> Vec<JobStatus>;
}

#[derive(Default)]
struct JobState {
    running: bool,
    queued: usize,
    last_run: Option<SyncReport>,
}

#[derive(Default)]
struct JobSlot {
    state: Mutex<JobState>,
}

impl JobSlot {
    fn update(&self, f: impl FnOnce(&mut JobState)) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    }
}

struct Inner<S, R> {
    source: S,
    store: R,
    slots: [JobSlot; SyncJob::ALL.len()],
    /// Held for the whole duration of a run, indexed by [`gate_index`].
    gates: [tokio::sync::Mutex<()>; SyncJob::ALL.len()],
}

/// Gate shared by every job that writes the same collection.
fn gate_index(job: SyncJob) -> usize {
    match job {
        // Both genre jobs write the genre collection.
        SyncJob::TvGenres => SyncJob::MovieGenres as usize,
        other => other as usize,
    }
}

/// Executes sync jobs against a provider and a store.
pub struct SyncRunner<S, R> {
    inner: Arc<Inner<S, R>>,
}

impl<S, R> Clone for SyncRunner<S, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, R> SyncRunner<S, R>
where
    S: CatalogSource,
    R: RecordStore,
{
    pub fn new(source: S, store: R) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                store,
                slots: Default::default(),
                gates: Default::default(),
            }),
        }
    }

    /// Run `job` to completion, waiting for any in-flight run of it first.
    pub async fn run(&self, job: SyncJob) -> SyncReport {
        self.run_with_id(job, Uuid::now_v7()).await
    }

    async fn run_with_id(&self, job: SyncJob, run_id: Uuid) -> SyncReport {
        let span = tracing::info_span!("sync_run", job = %job, %run_id);
        self.run_serialized(job, run_id).instrument(span).await
    }

    async fn run_serialized(&self, job: SyncJob, run_id: Uuid) -> SyncReport {
        let slot = self.slot(job);
        let gate = &self.inner.gates[gate_index(job)];

        slot.update(|state| state.queued += 1);
        let _gate = match gate.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                tracing::info!("Previous run still in progress, waiting");
                gate.lock().await
            }
        };
        slot.update(|state| {
            state.queued -= 1;
            state.running = true;
        });

        tracing::info!("Sync run started");
        let started_at = Utc::now();
        let outcome = self.execute(job).await;
        let finished_at = Utc::now();

        let elapsed_ms = (finished_at - started_at).num_milliseconds();
        if outcome.is_success() {
            tracing::info!(elapsed_ms, ?outcome, "Sync run finished");
        } else {
            tracing::warn!(elapsed_ms, ?outcome, "Sync run finished with failures");
        }

        let report = SyncReport {
            run_id,
            job,
            started_at,
            finished_at,
            outcome,
        };
        slot.update(|state| {
            state.running = false;
            state.last_run = Some(report.clone());
        });
        report
    }

    async fn execute(&self, job: SyncJob) -> SyncOutcome {
        let source = &self.inner.source;
        let store = &self.inner.store;

        match job {
            SyncJob::MovieGenres => sync_genres(source, store, Medium::Movie).await,
            SyncJob::TvGenres => sync_genres(source, store, Medium::Tv).await,
            SyncJob::Movies => sync_next_page(source, store, &catalog::MOVIES).await,
            SyncJob::TvShows => sync_next_page(source, store, &catalog::TV_SHOWS).await,
            SyncJob::MovieRecommendations => {
                sync_recommendations(source, store, &recommendations::MOVIE_RECOMMENDATIONS).await
            }
            SyncJob::TvRecommendations => {
                sync_recommendations(source, store, &recommendations::TV_RECOMMENDATIONS).await
            }
            SyncJob::Configuration => sync_configuration(source, store).await,
        }
    }

    fn slot(&self, job: SyncJob) -> &JobSlot {
        &self.inner.slots[job as usize]
    }
}

impl<S, R> Launcher for SyncRunner<S, R>
where
    S: CatalogSource,
    R: RecordStore,
{
    fn launch(&self, job: SyncJob) -> RunTicket {
        let run_id = Uuid::now_v7();
        let runner = self.clone();
        tokio::spawn(async move {
            runner.run_with_id(job, run_id).await;
        });
        tracing::debug!(%job, %run_id, "Sync run launched");
        RunTicket { run_id, job }
    }

    fn statuses(&self) -> Vec<JobStatus> {
        SyncJob::ALL
            .iter()
            .map(|&job| {
                let state = self
                    .slot(job)
                    .state
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                JobStatus {
                    job,
                    running: state.running,
                    queued: state.queued,
                    last_run: state.last_run.clone(),
                }
            })
            .collect()
    }
}
