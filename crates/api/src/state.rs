use std::sync::Arc;

use reelsync_sync::Launcher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Starts sync runs in the background and reports their status.
    pub launcher: Arc<dyn Launcher>,
}
