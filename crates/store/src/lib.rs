//! Client for the downstream content store, the sink side of the bridge.

pub mod client;
pub mod collections;
pub mod config;
pub mod error;
pub mod query;

pub use client::StoreClient;
pub use config::StoreConfig;
pub use error::StoreError;
