//! Realty Listing Service Persistence Layer
//!
//! This crate holds the domain model of the listing service, the search core
//! that turns raw query parameters into store queries, the store traits, and
//! the SQLite backend that implements them.
//!
//! # Features
//!
//! - `sqlite` (default) - SQLite backend with in-memory and file modes
//!
//! # Architecture
//!
//! - [`types`] - Listings, owners, input validation, predicates, pagination
//! - [`search`] - `ListingParams`, `FilterBuilder`, `PaginationPlanner`
//! - [`core`] - Store traits and the listing request orchestrator
//! - [`backends`] - Backend implementations
//! - [`seed`] - Demo dataset
//! - [`error`] - Error types for all operations
//!
//! # Quick Start
//!
//! ```no_run
//! use realty_persistence::backends::sqlite::SqliteBackend;
//! use realty_persistence::core::{Backend, list_listings};
//! use realty_persistence::search::ListingParams;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteBackend::in_memory()?;
//! store.initialize().await?;
//! realty_persistence::seed::seed_demo_data(&store).await?;
//!
//! let params = ListingParams::from_pairs([("city", "Alicante"), ("sort", "price:asc")]);
//! let page = list_listings(&store, &params).await?;
//! println!("{} of {} listings", page.data.len(), page.pagination.total);
//! # Ok(())
//! # }
//! ```
//!
//! # Filtering Rules
//!
//! Listing filters never fail. A parameter that is absent, blank, malformed
//! or outside its allowed values simply imposes no constraint:
//!
//! ```
//! use realty_persistence::search::{FilterBuilder, ListingParams};
//!
//! let garbage = ListingParams::from_pairs([("minPrice", "cheap"), ("propertyType", "castle")]);
//! assert!(FilterBuilder::build(&garbage).is_unconstrained());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod search;
pub mod seed;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use search::{FilterBuilder, ListingParams, PaginationPlanner};
pub use types::{ListingPage, ListingPredicate, ListingRecord, Owner, PropertyListing};

// Re-export core traits
pub use core::{Backend, ListingSearch, ListingStorage, OwnerStorage, RealtyStore};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
