//! Sync engine: moves provider data into the content store.
//!
//! Every job is a single idempotent pass. Paginated jobs advance one page
//! per run, with the cursor recovered from what the store already holds.
//! Jobs are executed by [`SyncRunner`] and triggered either over HTTP or
//! by [`SyncScheduler`].

pub mod catalog;
pub mod configuration;
pub mod cursor;
pub mod genres;
mod items;
pub mod recommendations;
pub mod remote;
pub mod runner;
pub mod scheduler;

pub use remote::{CatalogSource, RecordStore};
pub use runner::{JobStatus, Launcher, RunTicket, SyncRunner};
pub use scheduler::{ScheduleConfig, ScheduleEntry, SyncScheduler};
