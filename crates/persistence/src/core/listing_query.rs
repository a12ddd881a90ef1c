//! Listing request orchestration.
//!
//! Glues [`FilterBuilder`] and [`PaginationPlanner`] to a [`ListingSearch`]
//! store. The paginated listing and the CSV export share the same predicate
//! construction, so an export always contains exactly the rows the listing
//! would page through.

use tracing::debug;

use crate::error::StorageResult;
use crate::search::{FilterBuilder, ListingParams, PaginationPlanner};
use crate::types::{ListingPage, ListingRecord};

use super::storage::ListingSearch;

/// Runs a filtered, sorted, paginated listing query.
///
/// The page fetch and the total count are issued concurrently and joined; if
/// either fails the whole request fails. Neither is retried.
pub async fn list_listings<S>(store: &S, params: &ListingParams) -> StorageResult<ListingPage>
where
    S: ListingSearch + ?Sized,
{
    let predicate = FilterBuilder::build(params);
    let sort = FilterBuilder::sort(params);
    let window = PaginationPlanner::plan(params.page.as_deref(), params.limit.as_deref());

    debug!(
        page = window.page,
        limit = window.limit,
        ?sort,
        "Querying listings"
    );

    let (data, total) = tokio::try_join!(
        store.query(&predicate, sort, Some(window)),
        store.count(&predicate),
    )?;

    Ok(ListingPage {
        data,
        pagination: PaginationPlanner::metadata(total, window.page, window.limit),
    })
}

/// Runs the same filtered, sorted query without pagination.
///
/// `page` and `limit` are ignored.
pub async fn export_listings<S>(
    store: &S,
    params: &ListingParams,
) -> StorageResult<Vec<ListingRecord>>
where
    S: ListingSearch + ?Sized,
{
    let predicate = FilterBuilder::build(params);
    let sort = FilterBuilder::sort(params);
    debug!(?sort, "Exporting listings");
    store.query(&predicate, sort, None).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BackendError, StorageError};
    use crate::types::{
        Amenities, ListingPredicate, ListingSort, ListingStatus, OperationType, PageWindow,
        PropertyListing, PropertyType,
    };
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use parking_lot::Mutex;
    use rust_decimal::Decimal;

    /// In-memory store that evaluates predicates with `ListingPredicate::matches`.
    struct MemoryStore {
        listings: Vec<PropertyListing>,
        seen: Mutex<Vec<(ListingPredicate, Option<PageWindow>)>>,
        fail_count: bool,
    }

    impl MemoryStore {
        fn new(listings: Vec<PropertyListing>) -> Self {
            Self {
                listings,
                seen: Mutex::new(Vec::new()),
                fail_count: false,
            }
        }
    }

    #[async_trait]
    impl ListingSearch for MemoryStore {
        async fn query(
            &self,
            predicate: &ListingPredicate,
            sort: ListingSort,
            window: Option<PageWindow>,
        ) -> StorageResult<Vec<ListingRecord>> {
            self.seen.lock().push((predicate.clone(), window));
            let mut matches: Vec<_> = self
                .listings
                .iter()
                .filter(|l| predicate.matches(l))
                .cloned()
                .collect();
            matches.sort_by(|a, b| sort.compare(a, b));
            let rows = match window {
                Some(w) => matches
                    .into_iter()
                    .skip(w.offset as usize)
                    .take(w.limit as usize)
                    .collect(),
                None => matches,
            };
            Ok(rows.into_iter().map(ListingRecord::without_owner).collect())
        }

        async fn count(&self, predicate: &ListingPredicate) -> StorageResult<u64> {
            if self.fail_count {
                return Err(BackendError::QueryError {
                    message: "count failed".to_string(),
                }
                .into());
            }
            Ok(self.listings.iter().filter(|l| predicate.matches(l)).count() as u64)
        }
    }

    fn listing(id: i64, city: &str, price: i64, pool: bool) -> PropertyListing {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(id);
        PropertyListing {
            id,
            reference: Some(format!("REF-{id:04}")),
            address: format!("Calle {id}"),
            city: city.to_string(),
            province: city.to_string(),
            postal_code: None,
            description: None,
            property_type: PropertyType::Flat,
            operation_type: OperationType::Sale,
            status: ListingStatus::Available,
            price: Decimal::from(price),
            currency: "EUR".to_string(),
            bedrooms: 2,
            bathrooms: 1,
            area_sqm: Some(80),
            year_built: None,
            floor: None,
            heating: None,
            latitude: None,
            longitude: None,
            amenities: Amenities {
                pool,
                ..Default::default()
            },
            owner_id: None,
            created_at: created,
            updated_at: created,
        }
    }

    fn sample_store() -> MemoryStore {
        MemoryStore::new(
            (1..=25)
                .map(|i| {
                    let city = if i % 2 == 0 { "Alicante" } else { "Elche" };
                    listing(i, city, 100_000 + i * 10_000, i % 5 == 0)
                })
                .collect(),
        )
    }

    fn params(pairs: &[(&str, &str)]) -> ListingParams {
        ListingParams::from_pairs(pairs.iter().copied())
    }

    #[tokio::test]
    async fn test_list_returns_page_and_metadata() {
        let store = sample_store();
        let page = list_listings(&store, &params(&[("page", "2"), ("limit", "10")]))
            .await
            .unwrap();
        assert_eq!(page.data.len(), 10);
        assert_eq!(page.pagination.total, 25);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_next_page);
        assert!(page.pagination.has_prev_page);
        // newest first: ids 15..=6
        assert_eq!(page.data[0].listing.id, 15);
    }

    #[tokio::test]
    async fn test_price_range_containment() {
        let store = sample_store();
        let page = list_listings(
            &store,
            &params(&[("minPrice", "150000"), ("maxPrice", "200000"), ("limit", "100")]),
        )
        .await
        .unwrap();
        assert!(!page.data.is_empty());
        for record in &page.data {
            let price = record.listing.price;
            assert!(price >= Decimal::from(150_000) && price <= Decimal::from(200_000));
        }
        assert_eq!(page.pagination.total, page.data.len() as u64);
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let store = sample_store();
        let page = list_listings(&store, &params(&[("page", "9")])).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 25);
        assert!(!page.pagination.has_next_page);
    }

    #[tokio::test]
    async fn test_export_uses_same_predicate_without_window() {
        let store = sample_store();
        let p = params(&[("city", "alicante"), ("pool", "false"), ("page", "3")]);
        let listed = list_listings(&store, &p).await.unwrap();
        let exported = export_listings(&store, &p).await.unwrap();

        assert_eq!(exported.len() as u64, listed.pagination.total);
        let seen = store.seen.lock();
        assert_eq!(seen[0].0, seen[1].0);
        assert!(seen[0].1.is_some());
        assert!(seen[1].1.is_none());
    }

    #[tokio::test]
    async fn test_count_failure_fails_request() {
        let mut store = sample_store();
        store.fail_count = true;
        let err = list_listings(&store, &ListingParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Backend(BackendError::QueryError { .. })));
    }
}
