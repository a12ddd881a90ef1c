//! Core storage traits and the listing request orchestrator.
//!
//! - [`Backend`] - lifecycle and health of a database backend
//! - [`ListingSearch`] - filtered listing queries and counts
//! - [`ListingStorage`], [`OwnerStorage`] - CRUD
//! - [`RealtyStore`] - all of the above, as required by the HTTP layer
//! - [`list_listings`], [`export_listings`] - request orchestration
//!
//! # Trait Layout
//!
//! ```text
//! RealtyStore
//!     ├── Backend
//!     ├── ListingSearch
//!     ├── ListingStorage
//!     └── OwnerStorage
//! ```

mod backend;
mod listing_query;
mod storage;

pub use backend::Backend;
pub use listing_query::{export_listings, list_listings};
pub use storage::{ListingSearch, ListingStorage, OwnerStorage, RealtyStore};
