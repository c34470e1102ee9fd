//! Domain types shared by every reelsync crate.
//!
//! This crate performs no I/O: it holds the provider models, their mapping
//! into downstream records, cursor parsing, run reports and the error
//! taxonomy used across the sync pipeline.

pub mod catalog;
pub mod configuration;
pub mod cursor;
mod de;
pub mod error;
pub mod job;
pub mod report;
pub mod types;

pub use error::{Service, SyncError};
pub use job::{Medium, SyncJob};
