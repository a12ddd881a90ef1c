//! SQLite backend implementation.

use std::fmt::Debug;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::core::Backend;
use crate::error::{BackendError, StorageError, StorageResult};

use super::{query_builder, schema};

pub(crate) const BACKEND_NAME: &str = "sqlite";

/// SQLite backend for listings and owners.
///
/// Holds an r2d2 connection pool until [`Backend::disconnect`] is called.
/// Every store operation checks a connection out of the pool on the blocking
/// thread pool, so concurrent requests use separate connections.
pub struct SqliteBackend {
    pool: RwLock<Option<Pool<SqliteConnectionManager>>>,
    config: SqliteBackendConfig,
    location: String,
    is_memory: bool,
}

impl Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend")
            .field("config", &self.config)
            .field("location", &self.location)
            .field("is_memory", &self.is_memory)
            .field("connected", &self.pool.read().is_some())
            .finish()
    }
}

/// Configuration for the SQLite backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteBackendConfig {
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of idle connections.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// SQLite busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u32,

    /// Enable WAL mode for better concurrency.
    #[serde(default = "default_true")]
    pub enable_wal: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout_ms() -> u64 {
    30000
}

fn default_busy_timeout_ms() -> u32 {
    5000
}

fn default_true() -> bool {
    true
}

impl Default for SqliteBackendConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout_ms: default_connection_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
            enable_wal: true,
        }
    }
}

impl SqliteBackend {
    /// Creates a new in-memory SQLite backend.
    ///
    /// All pooled connections share one private in-memory database, which
    /// lives until the backend is disconnected or dropped.
    pub fn in_memory() -> StorageResult<Self> {
        Self::in_memory_with_config(SqliteBackendConfig::default())
    }

    /// Creates an in-memory backend with custom configuration.
    pub fn in_memory_with_config(config: SqliteBackendConfig) -> StorageResult<Self> {
        let uri = format!(
            "file:realty-mem-{}?mode=memory&cache=shared",
            uuid::Uuid::new_v4().simple()
        );
        Self::build(uri, true, config)
    }

    /// Opens or creates a file-based SQLite database.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        Self::with_config(path, SqliteBackendConfig::default())
    }

    /// Opens a database from a URL-ish location.
    ///
    /// Accepts `sqlite::memory:`, `:memory:`, `sqlite://<path>` and plain
    /// file paths.
    pub fn from_url(url: &str, config: SqliteBackendConfig) -> StorageResult<Self> {
        match url {
            ":memory:" | "sqlite::memory:" | "sqlite://:memory:" => {
                Self::in_memory_with_config(config)
            }
            other => {
                let path = other.strip_prefix("sqlite://").unwrap_or(other);
                Self::with_config(path, config)
            }
        }
    }

    /// Creates a file-based backend with custom configuration.
    pub fn with_config<P: AsRef<Path>>(
        path: P,
        config: SqliteBackendConfig,
    ) -> StorageResult<Self> {
        let location = path.as_ref().to_string_lossy().into_owned();
        if location == ":memory:" {
            return Self::in_memory_with_config(config);
        }
        Self::build(location, false, config)
    }

    fn build(location: String, is_memory: bool, config: SqliteBackendConfig) -> StorageResult<Self> {
        let busy_timeout = Duration::from_millis(u64::from(config.busy_timeout_ms));
        let enable_wal = config.enable_wal && !is_memory;

        let manager = SqliteConnectionManager::file(&location).with_init(move |conn| {
            conn.busy_timeout(busy_timeout)?;
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            query_builder::register_functions(conn)?;
            if enable_wal {
                conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))?;
            }
            Ok(())
        });

        let mut builder = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(Some(config.min_connections.max(u32::from(is_memory))))
            .connection_timeout(Duration::from_millis(config.connection_timeout_ms));
        if is_memory {
            // The shared in-memory database disappears with its last connection.
            builder = builder.idle_timeout(None).max_lifetime(None);
        }

        let pool = builder.build(manager).map_err(|e| {
            StorageError::Backend(BackendError::ConnectionFailed {
                backend_name: BACKEND_NAME.to_string(),
                message: e.to_string(),
            })
        })?;

        tracing::debug!(location = %location, is_memory, "Opened SQLite pool");

        Ok(Self {
            pool: RwLock::new(Some(pool)),
            config,
            location,
            is_memory,
        })
    }

    /// Initialize the database schema.
    pub fn init_schema(&self) -> StorageResult<()> {
        let conn = self.connection()?;
        schema::initialize_schema(&conn)
    }

    /// Returns a clone of the pool handle, or `Unavailable` after disconnect.
    fn pool(&self) -> Result<Pool<SqliteConnectionManager>, BackendError> {
        self.pool
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| BackendError::Unavailable {
                backend_name: BACKEND_NAME.to_string(),
                message: "backend has been disconnected".to_string(),
            })
    }

    fn connection(&self) -> StorageResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool()?.get().map_err(|e| {
            StorageError::Backend(BackendError::ConnectionFailed {
                backend_name: BACKEND_NAME.to_string(),
                message: e.to_string(),
            })
        })
    }

    /// Runs `op` with a pooled connection on the blocking thread pool.
    pub(crate) async fn run<T, F>(&self, op: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> StorageResult<T> + Send + 'static,
    {
        let pool = self.pool()?;
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                StorageError::Backend(BackendError::ConnectionFailed {
                    backend_name: BACKEND_NAME.to_string(),
                    message: e.to_string(),
                })
            })?;
            op(&mut conn)
        })
        .await
        .map_err(|e| {
            StorageError::Backend(BackendError::Internal {
                backend_name: BACKEND_NAME.to_string(),
                message: format!("blocking task failed: {}", e),
                source: Some(Box::new(e)),
            })
        })?
    }

    /// Returns whether this is an in-memory database.
    pub fn is_memory(&self) -> bool {
        self.is_memory
    }

    /// Returns the backend configuration.
    pub fn config(&self) -> &SqliteBackendConfig {
        &self.config
    }

    /// Returns true until [`Backend::disconnect`] has been called.
    pub fn is_connected(&self) -> bool {
        self.pool.read().is_some()
    }
}

#[async_trait]
impl Backend for SqliteBackend {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        self.run(|conn| {
            conn.query_row("SELECT 1", [], |_| Ok(())).map_err(|e| {
                StorageError::Backend(BackendError::Internal {
                    backend_name: BACKEND_NAME.to_string(),
                    message: format!("Health check failed: {}", e),
                    source: None,
                })
            })
        })
        .await
        .map_err(|e| match e {
            StorageError::Backend(backend) => backend,
            other => BackendError::Internal {
                backend_name: BACKEND_NAME.to_string(),
                message: other.to_string(),
                source: None,
            },
        })
    }

    async fn initialize(&self) -> Result<(), BackendError> {
        self.run(|conn| schema::initialize_schema(conn))
            .await
            .map_err(|e| BackendError::Internal {
                backend_name: BACKEND_NAME.to_string(),
                message: format!("Failed to initialize schema: {}", e),
                source: None,
            })
    }

    async fn disconnect(&self) {
        if self.pool.write().take().is_some() {
            tracing::info!(location = %self.location, "SQLite backend disconnected");
        }
    }
}
