//! Store traits for listings and owners.
//!
//! Reads return `StorageResult<Option<T>>` so callers can tell "not found"
//! apart from a failure. Mutations on a missing id fail with
//! [`ResourceError::NotFound`](crate::error::ResourceError::NotFound).

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{
    ListingPredicate, ListingRecord, ListingSort, NewListing, NewOwner, Owner, PageWindow,
};

use super::backend::Backend;

/// Filtered listing queries.
///
/// Implementations must apply exactly the same predicate semantics in
/// [`query`](ListingSearch::query) and [`count`](ListingSearch::count): the
/// count is the number of rows `query` would return with no window.
#[async_trait]
pub trait ListingSearch: Send + Sync {
    /// Returns the matching listings in `sort` order.
    ///
    /// A `None` window returns every match.
    async fn query(
        &self,
        predicate: &ListingPredicate,
        sort: ListingSort,
        window: Option<PageWindow>,
    ) -> StorageResult<Vec<ListingRecord>>;

    /// Returns the number of matching listings.
    async fn count(&self, predicate: &ListingPredicate) -> StorageResult<u64>;
}

/// Listing CRUD.
#[async_trait]
pub trait ListingStorage: Send + Sync {
    /// Reads a listing with its owner summary.
    async fn find_listing(&self, id: i64) -> StorageResult<Option<ListingRecord>>;

    /// Inserts a listing.
    ///
    /// # Errors
    ///
    /// * `ValidationError::InvalidReference` - if `owner_id` does not resolve
    async fn create_listing(&self, listing: NewListing) -> StorageResult<ListingRecord>;

    /// Replaces every field of an existing listing.
    ///
    /// # Errors
    ///
    /// * `ResourceError::NotFound` - if the listing does not exist
    /// * `ValidationError::InvalidReference` - if `owner_id` does not resolve
    async fn update_listing(&self, id: i64, listing: NewListing) -> StorageResult<ListingRecord>;

    /// Deletes a listing.
    ///
    /// # Errors
    ///
    /// * `ResourceError::NotFound` - if the listing does not exist
    async fn delete_listing(&self, id: i64) -> StorageResult<()>;
}

/// Owner CRUD.
#[async_trait]
pub trait OwnerStorage: Send + Sync {
    /// Lists all owners ordered by name, each with its listings.
    async fn list_owners(&self) -> StorageResult<Vec<Owner>>;

    /// Reads an owner with its listings.
    async fn find_owner_by_id(&self, id: i64) -> StorageResult<Option<Owner>>;

    /// Inserts an owner.
    async fn create_owner(&self, owner: NewOwner) -> StorageResult<Owner>;

    /// Replaces every field of an existing owner.
    async fn update_owner(&self, id: i64, owner: NewOwner) -> StorageResult<Owner>;

    /// Deletes an owner. Never cascades.
    ///
    /// # Errors
    ///
    /// * `ResourceError::NotFound` - if the owner does not exist
    /// * `ResourceError::Referenced` - if listings still reference the owner
    async fn delete_owner(&self, id: i64) -> StorageResult<()>;
}

/// Everything the HTTP layer needs from a store.
pub trait RealtyStore: Backend + ListingSearch + ListingStorage + OwnerStorage {}

impl<T> RealtyStore for T where T: Backend + ListingSearch + ListingStorage + OwnerStorage {}
