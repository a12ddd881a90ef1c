//! Listing search: parameter parsing, filtering, sorting and pagination.
//!
//! ```text
//! query pairs ─► ListingParams ─┬─► FilterBuilder::build ─► ListingPredicate
//!                               ├─► FilterBuilder::sort  ─► ListingSort
//!                               └─► PaginationPlanner::plan ─► PageWindow
//! ```
//!
//! Nothing in this module touches the store and nothing here can fail.
//!
//! # Example
//!
//! ```
//! use realty_persistence::search::{FilterBuilder, ListingParams, PaginationPlanner};
//!
//! let params = ListingParams::from_pairs([
//!     ("city", "Alicante"),
//!     ("priceMin", "100000"),
//!     ("page", "2"),
//! ]);
//!
//! let predicate = FilterBuilder::build(&params);
//! assert_eq!(predicate.city.as_deref(), Some("Alicante"));
//!
//! let window = PaginationPlanner::plan(params.page.as_deref(), params.limit.as_deref());
//! assert_eq!(window.offset, 10);
//! ```

mod coerce;
mod filter;
mod pagination;
mod params;

pub use filter::FilterBuilder;
pub use pagination::PaginationPlanner;
pub use params::ListingParams;
