//! Client for the TMDB metadata API, the source side of the bridge.

pub mod client;
pub mod config;
pub mod error;
pub mod paths;

pub use client::TmdbClient;
pub use config::TmdbConfig;
pub use error::TmdbError;
