//! API index handler.

use axum::{Json, response::IntoResponse};
use serde_json::json;

/// `GET /` - service name, version and entry points.
pub async fn index_handler() -> impl IntoResponse {
    Json(json!({
        "message": "Real-estate listing API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "listings": "/api/listings",
            "export": "/api/listings/export",
            "owners": "/api/owners",
            "health": "/health"
        }
    }))
}

/// Fallback for unmatched routes.
pub async fn not_found_handler() -> crate::error::RestError {
    crate::error::RestError::NotFound {
        message: "Route not found".to_string(),
    }
}
