//! Realty listing server.
//!
//! Opens the SQLite database named by the configuration, optionally loads
//! the demo dataset, and serves the listing API until Ctrl+C or SIGTERM.

use clap::Parser;
use realty_rest::{ServerConfig, create_app_with_config, init_logging};
use tokio::signal;
use tracing::{error, info};

#[cfg(feature = "sqlite")]
use {
    realty_persistence::backends::sqlite::{SqliteBackend, SqliteBackendConfig},
    realty_persistence::core::Backend,
    std::sync::Arc,
};

/// Opens the SQLite backend and brings its schema up to date.
#[cfg(feature = "sqlite")]
async fn create_sqlite_backend(config: &ServerConfig) -> anyhow::Result<SqliteBackend> {
    info!(database = %config.database_url, "Initializing SQLite backend");

    let backend = SqliteBackend::from_url(&config.database_url, SqliteBackendConfig::default())?;
    backend.initialize().await?;

    if backend.is_memory() {
        info!("Using an in-memory database; data is lost on shutdown");
    }

    Ok(backend)
}

/// Resolves when the process is asked to stop.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

/// Serves the API until a shutdown signal arrives.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Realty listing server"
    );

    start_sqlite(config).await
}

/// Runs the server on the SQLite backend.
#[cfg(feature = "sqlite")]
async fn start_sqlite(config: ServerConfig) -> anyhow::Result<()> {
    let backend = Arc::new(create_sqlite_backend(&config).await?);

    if config.seed_demo_data {
        let outcome = realty_persistence::seed::seed_if_empty(backend.as_ref()).await?;
        info!(?outcome, "Demo data check finished");
    }

    let app = create_app_with_config(Arc::clone(&backend), config.clone());
    let result = serve(app, &config).await;

    backend.disconnect().await;
    info!("Database disconnected");
    result
}

/// Fallback when the sqlite feature is not enabled.
#[cfg(not(feature = "sqlite"))]
async fn start_sqlite(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The sqlite backend requires the 'sqlite' feature. \
         Build with: cargo build -p realty-server --features sqlite"
    )
}
