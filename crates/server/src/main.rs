use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tubedrop_core::{
    load_config, load_default_config, validate_config, Config, DownloadOrchestrator,
    MediaFetcher, YtDlpFetcher,
};
use tubedrop_server::{api::create_router, state::AppState};

/// Config file used when `TUBEDROP_CONFIG` is not set and the file exists.
const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = resolve_config()?;
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Downloads directory: {:?}", config.downloads.dir);
    info!("Static files directory: {:?}", config.server.static_dir);
    info!(
        "Cleanup delay: {} ms, allowed hosts: {:?}",
        config.downloads.cleanup_delay_ms, config.downloads.allowed_hosts
    );

    let fetcher = YtDlpFetcher::new(config.fetcher.clone());
    if let Err(e) = fetcher.validate().await {
        warn!(
            "Downloader check failed ({}); downloads will fail until yt-dlp is installed at {:?}",
            e, config.fetcher.binary_path
        );
    }

    let orchestrator = Arc::new(DownloadOrchestrator::new(
        &config.downloads,
        Arc::new(fetcher),
    ));
    orchestrator
        .ensure_downloads_dir()
        .await
        .with_context(|| format!("Failed to create {:?}", config.downloads.dir))?;
    info!("Downloader: {}", orchestrator.fetcher_name());

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, Arc::clone(&orchestrator)));
    let app = create_router(state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    let pending = orchestrator.cleanup().pending();
    if pending > 0 {
        info!("Waiting for {} pending file cleanup(s)...", pending);
    }
    orchestrator.cleanup().shutdown().await;
    info!("Server stopped");

    Ok(())
}

/// Explicit `TUBEDROP_CONFIG` must exist; otherwise `config.toml` is used when
/// present and built-in defaults when not.
fn resolve_config() -> Result<Config> {
    match std::env::var("TUBEDROP_CONFIG") {
        Ok(path) => {
            let path = PathBuf::from(path);
            info!("Loading configuration from {:?}", path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        Err(_) => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if path.exists() {
                info!("Loading configuration from {:?}", path);
                load_config(&path)
                    .with_context(|| format!("Failed to load config from {:?}", path))
            } else {
                info!("No config file, using defaults and environment");
                load_default_config().context("Failed to load default configuration")
            }
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
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

    info!("Shutting down server...");
}
