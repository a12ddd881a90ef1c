//! Route configuration for the listing API.

use axum::{Router, routing::get};
use realty_persistence::core::RealtyStore;

use crate::handlers::{self, listings, owners};
use crate::state::AppState;

/// Creates all API routes.
///
/// # Routes
///
/// ## Service
/// - `GET /` - API index
/// - `GET /health`, `/_liveness`, `/_readiness` - probes
///
/// ## Listings
/// - `GET /api/listings` - search
/// - `GET /api/listings/export` - CSV export
/// - `POST /api/listings` - create
/// - `GET|PUT|DELETE /api/listings/{id}`
///
/// ## Owners
/// - `GET|POST /api/owners`
/// - `GET|PUT|DELETE /api/owners/{id}`
///
/// Anything else answers 404 `Route not found`.
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: RealtyStore + 'static,
{
    Router::new()
        // Service routes
        .route("/", get(handlers::index_handler))
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>))
        // Listing routes; the static export segment wins over {id}
        .route(
            "/api/listings",
            get(listings::list_handler::<S>).post(listings::create_handler::<S>),
        )
        .route("/api/listings/export", get(listings::export_handler::<S>))
        .route(
            "/api/listings/{id}",
            get(listings::read_handler::<S>)
                .put(listings::update_handler::<S>)
                .delete(listings::delete_handler::<S>),
        )
        // Owner routes
        .route(
            "/api/owners",
            get(owners::list_handler::<S>).post(owners::create_handler::<S>),
        )
        .route(
            "/api/owners/{id}",
            get(owners::read_handler::<S>)
                .put(owners::update_handler::<S>)
                .delete(owners::delete_handler::<S>),
        )
        .fallback(handlers::not_found_handler)
        .with_state(state)
}
