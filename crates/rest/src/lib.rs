//! Realty Listing Service HTTP API
//!
//! This crate exposes the listing store over a JSON REST API built on
//! [axum](https://docs.rs/axum). It owns the HTTP concerns only: routing,
//! request extraction, response envelopes, CSV rendering, error mapping and
//! server configuration. Querying, validation and storage live in
//! `realty-persistence`.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/listings` | Filtered, sorted, paginated listings |
//! | GET | `/api/listings/export` | CSV export with the same filters |
//! | GET/PUT/DELETE | `/api/listings/{id}` | Read, replace, delete a listing |
//! | POST | `/api/listings` | Create a listing |
//! | GET/POST | `/api/owners` | List or create owners |
//! | GET/PUT/DELETE | `/api/owners/{id}` | Read, replace, delete an owner |
//! | GET | `/health`, `/_liveness`, `/_readiness` | Probes |
//!
//! # Example
//!
//! ```rust,no_run
//! use realty_persistence::backends::sqlite::SqliteBackend;
//! use realty_persistence::core::Backend;
//! use realty_rest::{ServerConfig, create_app};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteBackend::in_memory()?;
//!     store.initialize().await?;
//!
//!     let app = create_app(store);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:4000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, extract::DefaultBodyLimit, http::StatusCode};
use realty_persistence::core::RealtyStore;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(store: S) -> Router
where
    S: RealtyStore + 'static,
{
    create_app_with_config(Arc::new(store), ServerConfig::default())
}

/// Creates the application around a shared store.
///
/// The caller keeps its own handle on the store, typically to disconnect it
/// after the server has shut down.
pub fn create_app_with_config<S>(store: Arc<S>, config: ServerConfig) -> Router
where
    S: RealtyStore + 'static,
{
    info!(backend = store.name(), "Creating listing API");

    let state = AppState::new(store, config.clone());
    let router = routing::create_routes(state).layer(DefaultBodyLimit::max(config.max_body_size));

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    let router = router.layer(service_builder);

    // Outermost, so the id is set before tracing and echoed on every response
    if config.enable_request_id {
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    } else {
        router
    }
}

/// Builds the CORS layer from the comma-separated configuration lists.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set. Call once at startup.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "realty={level},realty_rest={level},realty_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
