//! Backend lifecycle abstraction.
//!
//! A [`Backend`] owns the database resources behind a store. Its lifecycle is
//! explicit: the server calls [`Backend::initialize`] once at startup and
//! [`Backend::disconnect`] once after graceful shutdown. Any store call made
//! after `disconnect` fails with `BackendError::Unavailable`.

use async_trait::async_trait;

use crate::error::BackendError;

/// Lifecycle and health operations every database backend provides.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the backend's name (e.g. `"sqlite"`).
    fn name(&self) -> &'static str;

    /// Checks that the backend can serve requests.
    async fn health_check(&self) -> Result<(), BackendError>;

    /// Creates the schema if it does not exist yet.
    async fn initialize(&self) -> Result<(), BackendError>;

    /// Releases all connections. Idempotent.
    async fn disconnect(&self);
}
