//! Core types for the persistence layer.
//!
//! - [`PropertyListing`], [`ListingRecord`] - listings and their read model
//! - [`Owner`], [`OwnerSummary`] - listing owners
//! - [`ListingInput`], [`OwnerInput`] - write-side bodies with validation
//! - [`ListingPredicate`], [`ListingSort`] - normalized search terms
//! - [`PageWindow`], [`PaginationMeta`] - offset pagination
//!
//! # Example
//!
//! ```
//! use realty_persistence::types::{ListingPredicate, PriceRange, PropertyType};
//! use rust_decimal::Decimal;
//!
//! let predicate = ListingPredicate {
//!     city: Some("alicante".to_string()),
//!     property_type: Some(PropertyType::Flat),
//!     price: PriceRange {
//!         min: Some(Decimal::from(100_000)),
//!         max: None,
//!     },
//!     ..Default::default()
//! };
//! assert!(!predicate.is_unconstrained());
//! ```

mod input;
mod listing;
mod owner;
mod pagination;
mod predicate;

pub use input::{
    DEFAULT_CURRENCY, ListingInput, MIN_YEAR_BUILT, NewListing, NewOwner, OwnerInput,
};
pub use listing::{
    Amenities, ListingRecord, ListingStatus, OperationType, PropertyListing, PropertyType,
};
pub use owner::{Owner, OwnerSummary};
pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageWindow, PaginationMeta};
pub use predicate::{ListingPredicate, ListingSort, PriceRange, SortDirection, SortField};

/// A page of listing results with its metadata.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ListingPage {
    /// The rows of the requested page.
    pub data: Vec<ListingRecord>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
