//! Normalized listing search predicate and sort order.
//!
//! A [`ListingPredicate`] is a conjunction of optional terms; an unset term
//! imposes no constraint. Predicates are produced by the search layer's
//! `FilterBuilder` and are backend-neutral: SQL backends translate them to a
//! `WHERE` clause, and [`ListingPredicate::matches`] evaluates them in memory.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::Serialize;

use super::listing::{ListingStatus, OperationType, PropertyListing, PropertyType};

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    /// Inclusive lower bound.
    pub min: Option<Decimal>,
    /// Inclusive upper bound.
    pub max: Option<Decimal>,
}

impl PriceRange {
    /// Returns true if `price` lies within the bounds.
    pub fn contains(&self, price: Decimal) -> bool {
        self.min.is_none_or(|min| price >= min) && self.max.is_none_or(|max| price <= max)
    }

    /// Returns true if neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// A conjunction of optional listing filter terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPredicate {
    /// Case-insensitive substring on address OR description.
    pub search: Option<String>,
    /// Case-insensitive substring on city.
    pub city: Option<String>,
    /// Case-insensitive substring on province.
    pub province: Option<String>,
    /// Exact property type.
    pub property_type: Option<PropertyType>,
    /// Exact operation type.
    pub operation_type: Option<OperationType>,
    /// Exact status.
    pub status: Option<ListingStatus>,
    /// Inclusive price bounds.
    pub price: PriceRange,
    /// Inclusive lower bound on bedrooms.
    pub min_bedrooms: Option<i64>,
    /// `Some(true)` requires a pool, `Some(false)` excludes listings with one.
    pub pool: Option<bool>,
}

impl ListingPredicate {
    /// Returns true if no term is set.
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    /// Evaluates the predicate against a listing.
    pub fn matches(&self, listing: &PropertyListing) -> bool {
        if let Some(needle) = &self.search {
            let in_address = contains_ignore_case(&listing.address, needle);
            let in_description = listing
                .description
                .as_deref()
                .is_some_and(|d| contains_ignore_case(d, needle));
            if !in_address && !in_description {
                return false;
            }
        }
        if let Some(city) = &self.city
            && !contains_ignore_case(&listing.city, city)
        {
            return false;
        }
        if let Some(province) = &self.province
            && !contains_ignore_case(&listing.province, province)
        {
            return false;
        }

        self.property_type.is_none_or(|t| t == listing.property_type)
            && self.operation_type.is_none_or(|t| t == listing.operation_type)
            && self.status.is_none_or(|s| s == listing.status)
            && self.price.contains(listing.price)
            && self
                .min_bedrooms
                .is_none_or(|min| i64::from(listing.bedrooms) >= min)
            && self.pool.is_none_or(|pool| pool == listing.amenities.pool)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Fields a listing result may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// `price`
    Price,
    /// `areaSqm`
    AreaSqm,
    /// `bedrooms`
    Bedrooms,
    /// `createdAt`
    CreatedAt,
}

impl SortField {
    /// Parses an allow-listed field name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "price" => Some(SortField::Price),
            "areaSqm" => Some(SortField::AreaSqm),
            "bedrooms" => Some(SortField::Bedrooms),
            "createdAt" => Some(SortField::CreatedAt),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SortDirection {
    /// Smallest first.
    #[serde(rename = "asc")]
    Ascending,
    /// Largest first.
    #[serde(rename = "desc")]
    Descending,
}

/// A resolved sort order. Ties are broken by `id` in the same direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ListingSort {
    /// Primary sort column.
    pub field: SortField,
    /// Direction of both the primary column and the tie-break.
    pub direction: SortDirection,
}

impl Default for ListingSort {
    /// Newest first.
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Descending,
        }
    }
}

impl ListingSort {
    /// Creates a sort order.
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Compares two listings under this order, including the id tie-break.
    ///
    /// Listings without an area sort before any listing with one when
    /// ascending, matching SQLite's NULL ordering.
    pub fn compare(&self, a: &PropertyListing, b: &PropertyListing) -> Ordering {
        let primary = match self.field {
            SortField::Price => a.price.cmp(&b.price),
            SortField::AreaSqm => a.area_sqm.cmp(&b.area_sqm),
            SortField::Bedrooms => a.bedrooms.cmp(&b.bedrooms),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        let ordering = primary.then_with(|| a.id.cmp(&b.id));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::listing::Amenities;
    use chrono::{TimeZone, Utc};

    fn listing(id: i64, price: i64) -> PropertyListing {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        PropertyListing {
            id,
            reference: None,
            address: "Calle Mayor 5".to_string(),
            city: "Alicante".to_string(),
            province: "Alicante".to_string(),
            postal_code: None,
            description: Some("Piso luminoso, cerca del centro".to_string()),
            property_type: PropertyType::Flat,
            operation_type: OperationType::Sale,
            status: ListingStatus::Available,
            price: Decimal::from(price),
            currency: "EUR".to_string(),
            bedrooms: 3,
            bathrooms: 2,
            area_sqm: Some(95),
            year_built: None,
            floor: None,
            heating: None,
            latitude: None,
            longitude: None,
            amenities: Amenities::default(),
            owner_id: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_empty_predicate_matches_everything() {
        let predicate = ListingPredicate::default();
        assert!(predicate.is_unconstrained());
        assert!(predicate.matches(&listing(1, 100)));
    }

    #[test]
    fn test_price_range_inclusive() {
        let range = PriceRange {
            min: Some(Decimal::from(100)),
            max: Some(Decimal::from(200)),
        };
        assert!(range.contains(Decimal::from(100)));
        assert!(range.contains(Decimal::from(200)));
        assert!(!range.contains(Decimal::from(99)));
        assert!(!range.contains(Decimal::from(201)));
    }

    #[test]
    fn test_search_matches_address_or_description() {
        let predicate = ListingPredicate {
            search: Some("LUMINOSO".to_string()),
            ..Default::default()
        };
        assert!(predicate.matches(&listing(1, 100)));

        let predicate = ListingPredicate {
            search: Some("mayor".to_string()),
            ..Default::default()
        };
        assert!(predicate.matches(&listing(1, 100)));

        let predicate = ListingPredicate {
            search: Some("playa".to_string()),
            ..Default::default()
        };
        assert!(!predicate.matches(&listing(1, 100)));
    }

    #[test]
    fn test_pool_false_excludes_pools() {
        let mut with_pool = listing(1, 100);
        with_pool.amenities.pool = true;
        let predicate = ListingPredicate {
            pool: Some(false),
            ..Default::default()
        };
        assert!(!predicate.matches(&with_pool));
        assert!(predicate.matches(&listing(2, 100)));
    }

    #[test]
    fn test_sort_tie_break_follows_direction() {
        let a = listing(1, 100);
        let b = listing(2, 100);
        let asc = ListingSort::new(SortField::Price, SortDirection::Ascending);
        let desc = ListingSort::new(SortField::Price, SortDirection::Descending);
        assert_eq!(asc.compare(&a, &b), Ordering::Less);
        assert_eq!(desc.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_sort_field_allow_list() {
        assert_eq!(SortField::parse("areaSqm"), Some(SortField::AreaSqm));
        assert_eq!(SortField::parse("id"), None);
        assert_eq!(SortField::parse("price; DROP TABLE listings"), None);
    }
}
