//! Run reports.
//!
//! A report is produced for every finished run so the trigger surface can
//! expose outcomes that would otherwise only be visible in logs.

use serde::Serialize;
use uuid::Uuid;

use crate::job::SyncJob;
use crate::types::{PageNumber, Timestamp};

/// Per-item counters for one processed page or list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ItemTally {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ItemTally {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    pub fn total(&self) -> usize {
        self.created + self.skipped + self.failed
    }
}

/// How a single run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The requested source page was empty; nothing was written.
    Exhausted { page: PageNumber },
    /// Items of one page (or one non-paginated list) were processed.
    Completed {
        page: Option<PageNumber>,
        tally: ItemTally,
    },
    /// The configuration singleton did not exist and was created.
    ConfigurationCreated,
    /// The configuration singleton differed and was replaced.
    ConfigurationUpdated { changed: Vec<String> },
    /// The configuration singleton already matched the provider.
    ConfigurationUnchanged,
    /// The run could not complete (source unreachable, store write refused).
    Failed { error: String },
}

impl SyncOutcome {
    /// Whether the run did everything it set out to do.
    pub fn is_success(&self) -> bool {
        match self {
            Self::Completed { tally, .. } => tally.all_succeeded(),
            Self::Failed { .. } => false,
            _ => true,
        }
    }
}

/// Record of one finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub run_id: Uuid,
    pub job: SyncJob,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
    #[serde(flatten)]
    pub outcome: SyncOutcome,
}
