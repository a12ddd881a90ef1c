//! Translation of raw listing parameters into a normalized predicate.

use tracing::trace;

use crate::types::{
    ListingPredicate, ListingSort, ListingStatus, OperationType, PriceRange, PropertyType,
    SortDirection, SortField,
};

use super::coerce;
use super::params::ListingParams;

/// Builds [`ListingPredicate`]s and [`ListingSort`]s from [`ListingParams`].
///
/// Building never fails: absent, blank, malformed or out-of-vocabulary values
/// each leave their term unset. Both the paginated listing and the CSV export
/// go through this type, so the two always select the same rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterBuilder;

impl FilterBuilder {
    /// Builds the search predicate.
    pub fn build(params: &ListingParams) -> ListingPredicate {
        let predicate = ListingPredicate {
            search: coerce::text(params.search.as_deref()).map(str::to_string),
            city: coerce::text(params.city.as_deref()).map(str::to_string),
            province: coerce::text(params.province.as_deref()).map(str::to_string),
            property_type: coerce::text(params.property_type.as_deref())
                .and_then(PropertyType::parse),
            operation_type: coerce::text(params.operation_type.as_deref())
                .and_then(OperationType::parse),
            status: coerce::text(params.status.as_deref()).and_then(ListingStatus::parse),
            price: PriceRange {
                min: coerce::decimal(params.min_price.as_deref())
                    .or_else(|| coerce::decimal(params.price_min.as_deref())),
                max: coerce::decimal(params.max_price.as_deref())
                    .or_else(|| coerce::decimal(params.price_max.as_deref())),
            },
            min_bedrooms: coerce::integer(params.min_bedrooms.as_deref()),
            pool: Self::pool(params.pool.as_deref()),
        };
        trace!(?predicate, "Built listing predicate");
        predicate
    }

    /// Resolves the sort order.
    ///
    /// `sort` has the form `<field>:<direction>`. Unknown fields fall back to
    /// the default (newest first); any direction other than `asc` is
    /// descending.
    pub fn sort(params: &ListingParams) -> ListingSort {
        let Some(raw) = coerce::text(params.sort.as_deref()) else {
            return ListingSort::default();
        };
        let (field, direction) = raw.split_once(':').unwrap_or((raw, ""));
        let Some(field) = SortField::parse(field.trim()) else {
            return ListingSort::default();
        };
        let direction = if direction.trim() == "asc" {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        };
        ListingSort::new(field, direction)
    }

    /// Absent or empty leaves the term unset; `"true"` selects listings with
    /// a pool; any other value selects listings without one.
    fn pool(raw: Option<&str>) -> Option<bool> {
        match raw {
            None | Some("") => None,
            Some(value) => Some(value == "true"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn params(pairs: &[(&str, &str)]) -> ListingParams {
        ListingParams::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_empty_params_unconstrained() {
        let predicate = FilterBuilder::build(&ListingParams::default());
        assert!(predicate.is_unconstrained());
    }

    #[test]
    fn test_blank_values_are_absent() {
        let predicate = FilterBuilder::build(&params(&[
            ("city", ""),
            ("search", "  "),
            ("minPrice", ""),
            ("pool", ""),
            ("propertyType", ""),
        ]));
        assert!(predicate.is_unconstrained());
    }

    #[test]
    fn test_alias_precedence() {
        let predicate = FilterBuilder::build(&params(&[
            ("priceMin", "50000"),
            ("minPrice", "100000"),
            ("maxPrice", "300000"),
            ("priceMax", "900000"),
        ]));
        assert_eq!(predicate.price.min, Some(Decimal::from(100_000)));
        assert_eq!(predicate.price.max, Some(Decimal::from(300_000)));
    }

    #[test]
    fn test_alias_used_when_primary_absent() {
        let predicate = FilterBuilder::build(&params(&[("priceMin", "50000")]));
        assert_eq!(predicate.price.min, Some(Decimal::from(50_000)));
    }

    #[test]
    fn test_malformed_primary_falls_back_to_alias() {
        let predicate =
            FilterBuilder::build(&params(&[("minPrice", "cheap"), ("priceMin", "1000")]));
        assert_eq!(predicate.price.min, Some(Decimal::from(1000)));
    }

    #[test]
    fn test_malformed_min_price_equals_absent() {
        let with_garbage = FilterBuilder::build(&params(&[("minPrice", "abc"), ("city", "Elche")]));
        let without = FilterBuilder::build(&params(&[("city", "Elche")]));
        assert_eq!(with_garbage, without);
    }

    #[test]
    fn test_unknown_enum_values_ignored() {
        let predicate = FilterBuilder::build(&params(&[
            ("propertyType", "castle"),
            ("operationType", "lease"),
            ("status", "pending"),
        ]));
        assert!(predicate.is_unconstrained());
    }

    #[test]
    fn test_enum_values_parsed() {
        let predicate = FilterBuilder::build(&params(&[
            ("propertyType", "commercial-unit"),
            ("operationType", "rental"),
            ("status", "available"),
        ]));
        assert_eq!(predicate.property_type, Some(PropertyType::CommercialUnit));
        assert_eq!(predicate.operation_type, Some(OperationType::Rental));
        assert_eq!(predicate.status, Some(ListingStatus::Available));
    }

    #[test]
    fn test_pool_three_state() {
        assert_eq!(FilterBuilder::build(&params(&[])).pool, None);
        assert_eq!(FilterBuilder::build(&params(&[("pool", "true")])).pool, Some(true));
        assert_eq!(FilterBuilder::build(&params(&[("pool", "false")])).pool, Some(false));
        assert_eq!(FilterBuilder::build(&params(&[("pool", "yes")])).pool, Some(false));
    }

    #[test]
    fn test_min_bedrooms() {
        assert_eq!(
            FilterBuilder::build(&params(&[("minBedrooms", "3")])).min_bedrooms,
            Some(3)
        );
        assert_eq!(
            FilterBuilder::build(&params(&[("minBedrooms", "many")])).min_bedrooms,
            None
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let p = params(&[
            ("search", "luminoso"),
            ("minPrice", "1e5"),
            ("pool", "true"),
            ("status", "reserved"),
        ]);
        assert_eq!(FilterBuilder::build(&p), FilterBuilder::build(&p));
        assert_eq!(FilterBuilder::sort(&p), FilterBuilder::sort(&p));
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!(
            FilterBuilder::sort(&params(&[("sort", "price:asc")])),
            ListingSort::new(SortField::Price, SortDirection::Ascending)
        );
        assert_eq!(
            FilterBuilder::sort(&params(&[("sort", "areaSqm:desc")])),
            ListingSort::new(SortField::AreaSqm, SortDirection::Descending)
        );
        assert_eq!(
            FilterBuilder::sort(&params(&[("sort", "bedrooms:sideways")])),
            ListingSort::new(SortField::Bedrooms, SortDirection::Descending)
        );
        assert_eq!(
            FilterBuilder::sort(&params(&[("sort", "price")])),
            ListingSort::new(SortField::Price, SortDirection::Descending)
        );
    }

    #[test]
    fn test_unknown_sort_field_falls_back() {
        assert_eq!(
            FilterBuilder::sort(&params(&[("sort", "nonexistent:asc")])),
            ListingSort::default()
        );
        assert_eq!(FilterBuilder::sort(&params(&[])), ListingSort::default());
    }
}
