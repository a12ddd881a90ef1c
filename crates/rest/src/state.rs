//! Application state shared by all request handlers.

use std::sync::Arc;

use realty_persistence::core::RealtyStore;

use crate::config::ServerConfig;

/// Shared state: the store and the server configuration.
///
/// The store is constructed once at startup and injected here; handlers
/// never reach a global client.
pub struct AppState<S> {
    store: Arc<S>,
    config: Arc<ServerConfig>,
}

// S sits behind an Arc, so it does not need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: RealtyStore> AppState<S> {
    /// Creates the state from a shared store and a configuration.
    pub fn new(store: Arc<S>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Returns the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a new handle to the store.
    pub fn store_arc(&self) -> Arc<S> {
        Arc::clone(&self.store)
    }

    /// Returns the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use realty_persistence::backends::sqlite::SqliteBackend;

    #[test]
    fn test_app_state_clone_shares_store() {
        let store = Arc::new(SqliteBackend::in_memory().unwrap());
        let state = AppState::new(Arc::clone(&store), ServerConfig::for_testing());
        let cloned = state.clone();

        assert!(Arc::ptr_eq(&state.store_arc(), &cloned.store_arc()));
        assert_eq!(Arc::strong_count(&store), 3);
        assert_eq!(cloned.config().port, 0);
    }
}
