//! Periodic job triggering.
//!
//! Each schedule entry runs its own interval loop and hands its jobs to a
//! [`Launcher`]. The first tick fires one full period after startup so a
//! restart does not re-run every job immediately. Missed ticks are skipped,
//! never replayed in a burst.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use reelsync_core::SyncJob;

use crate::runner::Launcher;

const DEFAULT_CATALOG_INTERVAL: Duration = Duration::from_secs(3600);
const DEFAULT_GENRE_INTERVAL: Duration = Duration::from_secs(3600);
const DEFAULT_RECOMMENDATION_INTERVAL: Duration = Duration::from_secs(86_400);
const DEFAULT_CONFIGURATION_INTERVAL: Duration = Duration::from_secs(604_800);

/// Scheduler settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// When false no periodic runs happen; HTTP triggers still work.
    pub enabled: bool,
    /// Movies and TV shows.
    pub catalog_every: Duration,
    pub genres_every: Duration,
    pub recommendations_every: Duration,
    pub configuration_every: Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            catalog_every: DEFAULT_CATALOG_INTERVAL,
            genres_every: DEFAULT_GENRE_INTERVAL,
            recommendations_every: DEFAULT_RECOMMENDATION_INTERVAL,
            configuration_every: DEFAULT_CONFIGURATION_INTERVAL,
        }
    }
}

impl ScheduleConfig {
    /// Load settings from environment variables.
    ///
    /// | Env Var                             | Default   |
    /// |-------------------------------------|-----------|
    /// | `SYNC_SCHEDULER_ENABLED`            | `true`    |
    /// | `SYNC_CATALOG_INTERVAL_SECS`        | `3600`    |
    /// | `SYNC_GENRE_INTERVAL_SECS`          | `3600`    |
    /// | `SYNC_RECOMMENDATION_INTERVAL_SECS` | `86400`   |
    /// | `SYNC_CONFIGURATION_INTERVAL_SECS`  | `604800`  |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    ///
    /// Unparseable or zero intervals fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let enabled = match lookup("SYNC_SCHEDULER_ENABLED") {
            Some(v) => !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no" | "off"),
            None => defaults.enabled,
        };

        let secs = |key: &str, default: Duration| -> Duration {
            match lookup(key).map(|v| v.trim().parse::<u64>()) {
                None => default,
                Some(Ok(0)) => {
                    tracing::warn!(key, "Zero interval ignored, using default");
                    default
                }
                Some(Ok(secs)) => Duration::from_secs(secs),
                Some(Err(e)) => {
                    tracing::warn!(key, error = %e, "Invalid interval, using default");
                    default
                }
            }
        };

        Self {
            enabled,
            catalog_every: secs("SYNC_CATALOG_INTERVAL_SECS", defaults.catalog_every),
            genres_every: secs("SYNC_GENRE_INTERVAL_SECS", defaults.genres_every),
            recommendations_every: secs(
                "SYNC_RECOMMENDATION_INTERVAL_SECS",
                defaults.recommendations_every,
            ),
            configuration_every: secs(
                "SYNC_CONFIGURATION_INTERVAL_SECS",
                defaults.configuration_every,
            ),
        }
    }

    /// The schedule table, one entry per cadence.
    pub fn entries(&self) -> Vec<ScheduleEntry> {
        vec![
            ScheduleEntry {
                name: "catalog",
                every: self.catalog_every,
                jobs: vec![SyncJob::Movies, SyncJob::TvShows],
            },
            ScheduleEntry {
                name: "genres",
                every: self.genres_every,
                jobs: vec![SyncJob::MovieGenres, SyncJob::TvGenres],
            },
            ScheduleEntry {
                name: "recommendations",
                every: self.recommendations_every,
                jobs: vec![SyncJob::MovieRecommendations, SyncJob::TvRecommendations],
            },
            ScheduleEntry {
                name: "configuration",
                every: self.configuration_every,
                jobs: vec![SyncJob::Configuration],
            },
        ]
    }
}

/// Jobs launched together on a fixed period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub name: &'static str,
    pub every: Duration,
    pub jobs: Vec<SyncJob>,
}

/// Launches jobs on their configured cadence until cancelled.
pub struct SyncScheduler {
    launcher: Arc<dyn Launcher>,
    entries: Vec<ScheduleEntry>,
}

impl SyncScheduler {
    pub fn new(launcher: Arc<dyn Launcher>, entries: Vec<ScheduleEntry>) -> Self {
        Self { launcher, entries }
    }

    /// Run every entry's loop until `cancel` is triggered.
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(entries = self.entries.len(), "Sync scheduler started");

        let mut loops = JoinSet::new();
        for entry in self.entries {
            loops.spawn(run_entry(
                Arc::clone(&self.launcher),
                entry,
                cancel.clone(),
            ));
        }

        while let Some(joined) = loops.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "Schedule loop terminated abnormally");
            }
        }

        tracing::info!("Sync scheduler stopped");
    }
}

async fn run_entry(launcher: Arc<dyn Launcher>, entry: ScheduleEntry, cancel: CancellationToken) {
    tracing::info!(
        schedule = entry.name,
        interval_secs = entry.every.as_secs(),
        jobs = ?entry.jobs,
        "Schedule registered"
    );

    let mut ticker = interval_at(Instant::now() + entry.every, entry.every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(schedule = entry.name, "Schedule loop stopping");
                break;
            }
            _ = ticker.tick() => {
                for &job in &entry.jobs {
                    let ticket = launcher.launch(job);
                    tracing::info!(
                        schedule = entry.name,
                        %job,
                        run_id = %ticket.run_id,
                        "Scheduled run launched"
                    );
                }
            }
        }
    }
}
