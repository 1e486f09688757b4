//! StudyHub Realtime Server
//!
//! Main entry point that wires the hubs, router, and background tasks
//! together and starts the HTTP server.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use studyhub_api::AppState;
use studyhub_core::config::AppConfig;
use studyhub_core::error::AppError;
use studyhub_realtime::event::ticker::TickEvent;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("STUDYHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting StudyHub v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(config);
    let config = state.config.clone();

    // ── Shutdown channel ─────────────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Demo ticker task ─────────────────────────────────────────
    let ticker_handle = if config.ticker.enabled {
        tracing::info!(
            "Starting demo ticker (every {}s)...",
            config.ticker.interval_seconds
        );
        let hub = state.ticker.clone();
        let interval = Duration::from_secs(config.ticker.interval_seconds.max(1));
        let mut cancel = shutdown_rx.clone();
        Some(tokio::spawn(async move {
            let mut seq: u64 = 0;
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {
                        seq += 1;
                        hub.publish(&TickEvent::Tick { seq, at: Utc::now() });
                    }
                    _ = cancel.changed() => break,
                }
            }
            tracing::info!("Demo ticker stopped");
        }))
    } else {
        tracing::info!("Demo ticker disabled");
        None
    };

    // ── HTTP server ──────────────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = studyhub_api::build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("StudyHub server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Drain ────────────────────────────────────────────────────
    // Force-close remaining streams so held connections do not keep
    // the process alive past the grace window.
    state.shutdown_hubs();

    if let Some(handle) = ticker_handle {
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        let _ = tokio::time::timeout(grace, handle).await;
    }

    tracing::info!("StudyHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
