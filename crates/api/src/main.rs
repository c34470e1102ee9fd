use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reelsync_api::app::build_router;
use reelsync_api::config::ServerConfig;
use reelsync_api::state::AppState;
use reelsync_store::{StoreClient, StoreConfig};
use reelsync_sync::{Launcher, ScheduleConfig, SyncRunner, SyncScheduler};
use reelsync_tmdb::{TmdbClient, TmdbConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "reelsync_api=debug,reelsync_sync=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let tmdb_config = TmdbConfig::from_env();
    tracing::info!(
        base_url = %tmdb_config.base_url,
        language = %tmdb_config.language,
        "Loaded provider configuration"
    );

    let store_config = StoreConfig::from_env();
    tracing::info!(base_url = %store_config.base_url, "Loaded store configuration");

    let schedule = ScheduleConfig::from_env();

    // --- Remote clients ---
    let tmdb = TmdbClient::new(tmdb_config).expect("Failed to build provider HTTP client");
    let store = StoreClient::new(store_config).expect("Failed to build store HTTP client");

    // --- Runner ---
    let launcher: Arc<dyn Launcher> = Arc::new(SyncRunner::new(tmdb, store));

    // --- Scheduler ---
    let scheduler_cancel = CancellationToken::new();
    let scheduler_handle = if schedule.enabled {
        let scheduler = SyncScheduler::new(Arc::clone(&launcher), schedule.entries());
        let cancel = scheduler_cancel.clone();
        Some(tokio::spawn(async move {
            scheduler.run(cancel).await;
        }))
    } else {
        tracing::info!("Sync scheduler disabled, only HTTP triggers will run jobs");
        None
    };

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        launcher,
    };

    // --- Router ---
    let app = build_router(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    scheduler_cancel.cancel();
    if let Some(handle) = scheduler_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        tracing::info!("Sync scheduler stopped");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
