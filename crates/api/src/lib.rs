//! Reelsync HTTP surface.
//!
//! Exposes configuration, shared state and routes so the binary entrypoint
//! and the integration tests build the same application.

pub mod app;
pub mod config;
pub mod routes;
pub mod state;
