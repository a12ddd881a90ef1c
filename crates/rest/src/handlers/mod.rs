//! HTTP request handlers.
//!
//! Handlers are generic over the store so tests and alternative backends
//! can be plugged in through [`AppState`](crate::AppState).

pub mod health;
pub mod index;
pub mod listings;
pub mod owners;

pub use health::{health_handler, liveness_handler, readiness_handler};
pub use index::{index_handler, not_found_handler};
