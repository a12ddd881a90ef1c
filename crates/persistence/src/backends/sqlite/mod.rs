//! SQLite backend implementation.
//!
//! Implements every store trait on a relational schema with `CHECK` and
//! `FOREIGN KEY` constraints mirroring input validation. Supports both
//! in-memory databases (for tests and demos) and file-based databases.
//!
//! # Example
//!
//! ```no_run
//! use realty_persistence::backends::sqlite::SqliteBackend;
//! use realty_persistence::core::Backend;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.initialize().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE owners (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     name TEXT NOT NULL,
//!     email TEXT, phone TEXT, address TEXT, national_id TEXT,
//!     created_at TEXT NOT NULL
//! );
//!
//! CREATE TABLE listings (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     -- descriptive columns, enums as CHECK-constrained TEXT
//!     price REAL NOT NULL CHECK (price >= 0),
//!     -- amenity flags as 0/1 INTEGER
//!     owner_id INTEGER REFERENCES owners(id) ON DELETE RESTRICT,
//!     created_at TEXT NOT NULL,   -- RFC 3339, microsecond precision
//!     updated_at TEXT NOT NULL
//! );
//! ```

mod backend;
mod query_builder;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
