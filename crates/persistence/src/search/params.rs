//! Raw listing query parameters.

/// The recognized query options of the listing and export endpoints.
///
/// Every value is kept exactly as received; interpretation (aliasing, numeric
/// coercion, enum allow-listing) happens in
/// [`FilterBuilder`](super::FilterBuilder) and
/// [`PaginationPlanner`](super::PaginationPlanner). Field names follow
/// the camelCase query keys.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    /// `<field>:<direction>`
    pub sort: Option<String>,
    pub search: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    /// Alias of `min_price`; loses when both are present.
    pub price_min: Option<String>,
    /// Alias of `max_price`; loses when both are present.
    pub price_max: Option<String>,
    pub min_bedrooms: Option<String>,
    pub pool: Option<String>,
    pub property_type: Option<String>,
    pub operation_type: Option<String>,
    pub status: Option<String>,
}

impl ListingParams {
    /// Builds parameters from decoded query pairs.
    ///
    /// Unrecognized keys are ignored. When a key repeats, the first
    /// occurrence wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            if let Some(slot) = params.slot_mut(key.as_ref())
                && slot.is_none()
            {
                *slot = Some(value.into());
            }
        }
        params
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        let slot = match key {
            "page" => &mut self.page,
            "limit" => &mut self.limit,
            "sort" => &mut self.sort,
            "search" => &mut self.search,
            "city" => &mut self.city,
            "province" => &mut self.province,
            "minPrice" => &mut self.min_price,
            "maxPrice" => &mut self.max_price,
            "priceMin" => &mut self.price_min,
            "priceMax" => &mut self.price_max,
            "minBedrooms" => &mut self.min_bedrooms,
            "pool" => &mut self.pool,
            "propertyType" => &mut self.property_type,
            "operationType" => &mut self.operation_type,
            "status" => &mut self.status,
            _ => return None,
        };
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_maps_camel_case_keys() {
        let params = ListingParams::from_pairs([
            ("city", "Alicante"),
            ("minPrice", "100000"),
            ("priceMax", "300000"),
            ("propertyType", "flat"),
        ]);
        assert_eq!(params.city.as_deref(), Some("Alicante"));
        assert_eq!(params.min_price.as_deref(), Some("100000"));
        assert_eq!(params.price_max.as_deref(), Some("300000"));
        assert_eq!(params.property_type.as_deref(), Some("flat"));
        assert_eq!(params.max_price, None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let params = ListingParams::from_pairs([("city", "Elche"), ("city", "Murcia")]);
        assert_eq!(params.city.as_deref(), Some("Elche"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let params = ListingParams::from_pairs([("orderBy", "price"), ("_format", "json")]);
        assert_eq!(params, ListingParams::default());
    }
}
