//! Write-side input types and their validation.
//!
//! Request bodies deserialize into [`ListingInput`] / [`OwnerInput`]. Calling
//! `validate` checks every field, collects all failures into a single
//! [`ValidationError::InvalidInput`], and on success yields the normalized
//! [`NewListing`] / [`NewOwner`] handed to the store.

// Field names and meanings mirror `PropertyListing` and `Owner`
#![allow(missing_docs)]

use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationDetail, ValidationError};

use super::listing::{Amenities, ListingStatus, OperationType, PropertyType};

/// Earliest accepted construction year.
pub const MIN_YEAR_BUILT: i32 = 1800;

/// Currency applied when a listing omits one.
pub const DEFAULT_CURRENCY: &str = "EUR";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// A listing create/replace request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingInput {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub property_type: PropertyType,
    #[serde(default)]
    pub operation_type: Option<OperationType>,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub bedrooms: i64,
    #[serde(default)]
    pub bathrooms: i64,
    #[serde(default)]
    pub area_sqm: Option<i64>,
    #[serde(default)]
    pub year_built: Option<i32>,
    #[serde(default)]
    pub floor: Option<i32>,
    #[serde(default)]
    pub heating: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(flatten)]
    pub amenities: Amenities,
    #[serde(default)]
    pub owner_id: Option<i64>,
}

/// A validated listing ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub reference: Option<String>,
    pub address: String,
    pub city: String,
    pub province: String,
    pub postal_code: Option<String>,
    pub description: Option<String>,
    pub property_type: PropertyType,
    pub operation_type: OperationType,
    pub status: ListingStatus,
    pub price: Decimal,
    pub currency: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area_sqm: Option<u32>,
    pub year_built: Option<i32>,
    pub floor: Option<i32>,
    pub heating: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub amenities: Amenities,
    pub owner_id: Option<i64>,
}

impl ListingInput {
    /// Validates the body, reporting every offending field at once.
    pub fn validate(self) -> Result<NewListing, ValidationError> {
        let mut details = Vec::new();

        let address = required_text(&mut details, "address", self.address);
        let city = required_text(&mut details, "city", self.city);
        let province = required_text(&mut details, "province", self.province);

        let price = match self.price {
            Some(price) if price.is_sign_negative() && !price.is_zero() => {
                details.push(ValidationDetail::new("price", "price must be zero or greater"));
                None
            }
            Some(price) => Some(price),
            None => {
                details.push(ValidationDetail::new("price", "price is required"));
                None
            }
        };

        if self.operation_type.is_none() {
            details.push(ValidationDetail::new(
                "operationType",
                "operationType is required (sale, rental or sale-or-rental)",
            ));
        }

        let bedrooms = non_negative_count(&mut details, "bedrooms", self.bedrooms);
        let bathrooms = non_negative_count(&mut details, "bathrooms", self.bathrooms);

        let area_sqm = match self.area_sqm {
            None => None,
            Some(area) if area > 0 && area <= i64::from(u32::MAX) => u32::try_from(area).ok(),
            Some(_) => {
                details.push(ValidationDetail::new(
                    "areaSqm",
                    "areaSqm must be a positive number of square metres",
                ));
                None
            }
        };

        if let Some(year) = self.year_built {
            let current_year = Utc::now().year();
            if !(MIN_YEAR_BUILT..=current_year).contains(&year) {
                details.push(ValidationDetail::new(
                    "yearBuilt",
                    format!("yearBuilt must be between {MIN_YEAR_BUILT} and {current_year}"),
                ));
            }
        }

        if let Some(lat) = self.latitude
            && !(-90.0..=90.0).contains(&lat)
        {
            details.push(ValidationDetail::new("latitude", "latitude must be within -90..90"));
        }
        if let Some(lng) = self.longitude
            && !(-180.0..=180.0).contains(&lng)
        {
            details.push(ValidationDetail::new(
                "longitude",
                "longitude must be within -180..180",
            ));
        }

        let (Some(price), Some(operation_type), true) =
            (price, self.operation_type, details.is_empty())
        else {
            return Err(ValidationError::InvalidInput {
                message: "Validation failed".to_string(),
                details,
            });
        };

        Ok(NewListing {
            reference: optional_text(self.reference),
            address,
            city,
            province,
            postal_code: optional_text(self.postal_code),
            description: optional_text(self.description),
            property_type: self.property_type,
            operation_type,
            status: self.status,
            price,
            currency: optional_text(self.currency)
                .map(|c| c.to_uppercase())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            bedrooms,
            bathrooms,
            area_sqm,
            year_built: self.year_built,
            floor: self.floor,
            heating: optional_text(self.heating),
            latitude: self.latitude,
            longitude: self.longitude,
            amenities: self.amenities,
            owner_id: self.owner_id,
        })
    }
}

/// An owner create/replace request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub national_id: Option<String>,
}

/// A validated owner ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOwner {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub national_id: Option<String>,
}

impl OwnerInput {
    /// Validates the body, reporting every offending field at once.
    pub fn validate(self) -> Result<NewOwner, ValidationError> {
        let mut details = Vec::new();

        let name = required_text(&mut details, "name", self.name);
        let email = optional_text(self.email);
        if let Some(email) = &email
            && !EMAIL_PATTERN.is_match(email)
        {
            details.push(ValidationDetail::new("email", "email must be a valid address"));
        }

        if !details.is_empty() {
            return Err(ValidationError::InvalidInput {
                message: "Validation failed".to_string(),
                details,
            });
        }

        Ok(NewOwner {
            name,
            email,
            phone: optional_text(self.phone),
            address: optional_text(self.address),
            national_id: optional_text(self.national_id),
        })
    }
}

fn required_text(details: &mut Vec<ValidationDetail>, field: &str, value: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        details.push(ValidationDetail::new(field, format!("{field} is required")));
    }
    trimmed.to_string()
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_negative_count(details: &mut Vec<ValidationDetail>, field: &str, value: i64) -> u32 {
    match u32::try_from(value) {
        Ok(count) => count,
        Err(_) => {
            details.push(ValidationDetail::new(
                field,
                format!("{field} must be zero or greater"),
            ));
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_listing() -> ListingInput {
        serde_json::from_value(json!({
            "address": "Calle Mayor 5",
            "city": "Alicante",
            "province": "Alicante",
            "operationType": "sale",
            "price": "220000",
            "bedrooms": 3,
            "bathrooms": 2,
            "areaSqm": 95,
            "garage": true
        }))
        .unwrap()
    }

    fn failed_fields(err: ValidationError) -> Vec<String> {
        match err {
            ValidationError::InvalidInput { details, .. } => {
                details.into_iter().map(|d| d.field).collect()
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_valid_listing_applies_defaults() {
        let listing = valid_listing().validate().unwrap();
        assert_eq!(listing.property_type, PropertyType::Flat);
        assert_eq!(listing.status, ListingStatus::Available);
        assert_eq!(listing.currency, "EUR");
        assert_eq!(listing.price, Decimal::from(220_000));
        assert!(listing.amenities.garage);
        assert!(!listing.amenities.pool);
    }

    #[test]
    fn test_numeric_price_accepted() {
        let input: ListingInput = serde_json::from_value(json!({
            "address": "a", "city": "b", "province": "c",
            "operationType": "rental", "price": 650
        }))
        .unwrap();
        assert_eq!(input.validate().unwrap().price, Decimal::from(650));
    }

    #[test]
    fn test_reports_every_failed_field() {
        let input = ListingInput {
            address: "  ".to_string(),
            price: Some(Decimal::from(-1)),
            bedrooms: -2,
            area_sqm: Some(0),
            year_built: Some(1700),
            ..Default::default()
        };
        let fields = failed_fields(input.validate().unwrap_err());
        for expected in [
            "address",
            "city",
            "province",
            "price",
            "operationType",
            "bedrooms",
            "areaSqm",
            "yearBuilt",
        ] {
            assert!(fields.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn test_zero_price_is_valid() {
        let mut input = valid_listing();
        input.price = Some(Decimal::ZERO);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_future_year_rejected() {
        let mut input = valid_listing();
        input.year_built = Some(Utc::now().year() + 1);
        assert_eq!(failed_fields(input.validate().unwrap_err()), vec!["yearBuilt"]);
    }

    #[test]
    fn test_unknown_enum_is_deserialize_error() {
        let result: Result<ListingInput, _> = serde_json::from_value(json!({
            "address": "a", "city": "b", "province": "c",
            "operationType": "lease", "price": 1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_owner_requires_name() {
        let fields = failed_fields(OwnerInput::default().validate().unwrap_err());
        assert_eq!(fields, vec!["name"]);
    }

    #[test]
    fn test_owner_email_checked_when_present() {
        let owner = OwnerInput {
            name: "Inmobiliaria Sol SL".to_string(),
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert_eq!(failed_fields(owner.validate().unwrap_err()), vec!["email"]);

        let owner = OwnerInput {
            name: "Inmobiliaria Sol SL".to_string(),
            email: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(owner.validate().unwrap().email, None);
    }
}
