//! Masterblog Server Binary
//!
//! Starts the HTTP API for Masterblog.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use masterblog::config::ConfigBuilder;
use masterblog::{build_router, AppState, Config, PostStore};
use tracing_subscriber::{fmt, EnvFilter};

/// Masterblog Server
#[derive(Parser, Debug)]
#[command(name = "masterblog-server")]
#[command(about = "Blog post API with JSON-file persistence")]
#[command(version)]
struct Args {
    /// JSON file holding the posts
    #[arg(short, long)]
    storage_file: Option<String>,

    /// Listen address (host:port)
    #[arg(short, long)]
    listen: Option<String>,

    /// API key clients must present
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Skip API key checks
    #[arg(short, long)]
    debug: bool,

    /// Requests per minute per client IP (0 disables limiting)
    #[arg(short, long)]
    rate_limit: Option<u32>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,masterblog=debug,tower_http=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    // Environment first, flags override
    let config = match Config::from_env() {
        Ok(config) => apply_args(config, args),
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Masterblog Server v{}", masterblog::VERSION);
    tracing::info!("Storage file: {}", config.storage_file.display());
    tracing::info!("Listen address: {}", config.listen_addr);
    if config.debug {
        tracing::warn!("Debug mode: API key checks are disabled");
    } else if config.api_key.is_none() {
        tracing::warn!("No API key configured: every request will be rejected");
    }

    let addr: SocketAddr = match config.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid listen address {}: {}", config.listen_addr, e);
            std::process::exit(1);
        }
    };

    // Open store
    let store = match PostStore::open(&config.storage_file) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("Failed to open post store: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Store opened with {} posts", store.len());

    let app = build_router(AppState::new(config, store));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    let service = app.into_make_service_with_connect_info::<SocketAddr>();
    if let Err(e) = axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}

fn apply_args(config: Config, args: Args) -> Config {
    let mut builder = ConfigBuilder::from_config(config);

    if let Some(path) = args.storage_file {
        builder = builder.storage_file(path);
    }
    if let Some(addr) = args.listen {
        builder = builder.listen_addr(addr);
    }
    if let Some(key) = args.api_key {
        builder = builder.api_key(key);
    }
    if args.debug {
        builder = builder.debug(true);
    }
    if let Some(limit) = args.rate_limit {
        builder = builder.rate_limit_per_minute(limit);
    }

    builder.build()
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Unable to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Unable to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Received shutdown signal, stopping...");
}
