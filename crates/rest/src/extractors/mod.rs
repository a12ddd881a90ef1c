//! Request extractors.
//!
//! - [`ListingQuery`] - listing/export query options as [`ListingParams`](realty_persistence::search::ListingParams)
//! - [`JsonBody`] - JSON bodies with API-shaped rejections
//! - [`RecordId`] - numeric `{id}` path segments

mod json_body;
mod listing_query;
mod record_id;

pub use json_body::JsonBody;
pub use listing_query::ListingQuery;
pub use record_id::RecordId;
