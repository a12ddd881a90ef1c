//! Server configuration for the listing API.
//!
//! Every option can be given on the command line or through an environment
//! variable.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `REALTY_SERVER_PORT` | 4000 | Server port |
//! | `REALTY_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `REALTY_LOG_LEVEL` | info | Log level |
//! | `REALTY_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `REALTY_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `REALTY_ENABLE_CORS` | true | Enable CORS |
//! | `REALTY_CORS_ORIGINS` | http://localhost:5173,http://localhost:3000 | Allowed origins |
//! | `REALTY_CORS_METHODS` | GET,POST,PUT,DELETE,OPTIONS | Allowed methods |
//! | `REALTY_CORS_HEADERS` | Content-Type,Accept | Allowed headers |
//! | `REALTY_ENABLE_REQUEST_ID` | true | Tag responses with `x-request-id` |
//! | `REALTY_DATABASE_URL` | realty.db | SQLite database (`:memory:` for a throwaway one) |
//! | `REALTY_SEED_DEMO_DATA` | false | Load the demo dataset into an empty database |
//!
//! # Example
//!
//! ```rust
//! use realty_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 8080,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(config.socket_addr(), "0.0.0.0:8080");
//! ```

use clap::Parser;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";
const DEFAULT_CORS_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";
const DEFAULT_CORS_HEADERS: &str = "Content-Type,Accept";

/// Server configuration for the listing API.
#[derive(Debug, Clone, Parser)]
#[command(name = "realty")]
#[command(about = "Real-estate listing API server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "REALTY_SERVER_PORT", default_value = "4000")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "REALTY_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "REALTY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "REALTY_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "REALTY_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "REALTY_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "REALTY_CORS_ORIGINS", default_value = DEFAULT_CORS_ORIGINS)]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "REALTY_CORS_METHODS", default_value = DEFAULT_CORS_METHODS)]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(long, env = "REALTY_CORS_HEADERS", default_value = DEFAULT_CORS_HEADERS)]
    pub cors_headers: String,

    /// Tag every response with an `x-request-id` header.
    #[arg(long, env = "REALTY_ENABLE_REQUEST_ID", default_value = "true")]
    pub enable_request_id: bool,

    /// Database location: a file path, `sqlite://path`, or `:memory:`.
    #[arg(long, env = "REALTY_DATABASE_URL", default_value = "realty.db")]
    pub database_url: String,

    /// Load the demo dataset when the database is empty.
    #[arg(long, env = "REALTY_SEED_DEMO_DATA", default_value = "false")]
    pub seed_demo_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 4000,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024,
            request_timeout: 30,
            enable_cors: true,
            cors_origins: DEFAULT_CORS_ORIGINS.to_string(),
            cors_methods: DEFAULT_CORS_METHODS.to_string(),
            cors_headers: DEFAULT_CORS_HEADERS.to_string(),
            enable_request_id: true,
            database_url: "realty.db".to_string(),
            seed_demo_data: false,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from environment variables only, falling back
    /// to defaults when they do not parse.
    pub fn from_env() -> Self {
        Self::try_parse_from(["realty"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.database_url.trim().is_empty() {
            errors.push("Database URL cannot be empty".to_string());
        }

        if !matches!(
            self.log_level.to_ascii_lowercase().as_str(),
            "error" | "warn" | "info" | "debug" | "trace"
        ) {
            errors.push(format!("Unknown log level: {}", self.log_level));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing: ephemeral port, an
    /// in-memory database, and no CORS or request-id layers.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            max_body_size: 1024 * 1024,
            request_timeout: 5,
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            enable_request_id: false,
            database_url: ":memory:".to_string(),
            seed_demo_data: false,
        }
    }
}
