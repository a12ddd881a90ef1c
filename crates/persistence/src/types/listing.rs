//! Property listing types.
//!
//! A [`PropertyListing`] is a property offered for sale or rental. Listings are
//! read back from the store as [`ListingRecord`]s, which embed a summary of the
//! owner the listing references (if any).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::owner::OwnerSummary;

/// The kind of property being listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    /// An apartment in a multi-unit building.
    #[default]
    Flat,
    /// A detached house.
    Chalet,
    /// A terraced or semi-detached house.
    Townhouse,
    /// A single-room dwelling.
    Studio,
    /// A top-floor apartment.
    Penthouse,
    /// A ground-floor commercial premises.
    CommercialUnit,
}

impl PropertyType {
    /// All property types, in declaration order.
    pub const ALL: [PropertyType; 6] = [
        PropertyType::Flat,
        PropertyType::Chalet,
        PropertyType::Townhouse,
        PropertyType::Studio,
        PropertyType::Penthouse,
        PropertyType::CommercialUnit,
    ];

    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Flat => "flat",
            PropertyType::Chalet => "chalet",
            PropertyType::Townhouse => "townhouse",
            PropertyType::Studio => "studio",
            PropertyType::Penthouse => "penthouse",
            PropertyType::CommercialUnit => "commercial-unit",
        }
    }

    /// Parses the wire representation. Returns `None` for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

/// Whether a listing is offered for sale, rental, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationType {
    /// Offered for sale.
    Sale,
    /// Offered for rental.
    Rental,
    /// Offered for either sale or rental.
    SaleOrRental,
}

impl OperationType {
    /// All operation types, in declaration order.
    pub const ALL: [OperationType; 3] = [
        OperationType::Sale,
        OperationType::Rental,
        OperationType::SaleOrRental,
    ];

    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Sale => "sale",
            OperationType::Rental => "rental",
            OperationType::SaleOrRental => "sale-or-rental",
        }
    }

    /// Parses the wire representation. Returns `None` for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

/// Availability status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingStatus {
    /// Open for offers.
    #[default]
    Available,
    /// Held for a prospective buyer or tenant.
    Reserved,
    /// Sold.
    Sold,
    /// Rented out.
    Rented,
}

impl ListingStatus {
    /// All statuses, in declaration order.
    pub const ALL: [ListingStatus; 4] = [
        ListingStatus::Available,
        ListingStatus::Reserved,
        ListingStatus::Sold,
        ListingStatus::Rented,
    ];

    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Available => "available",
            ListingStatus::Reserved => "reserved",
            ListingStatus::Sold => "sold",
            ListingStatus::Rented => "rented",
        }
    }

    /// Parses the wire representation. Returns `None` for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

/// Boolean amenity flags of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Amenities {
    /// Private or communal pool.
    pub pool: bool,
    /// Parking space or garage.
    pub garage: bool,
    /// Separate storage room.
    pub storage_room: bool,
    /// Terrace or balcony.
    pub terrace: bool,
    /// Building has an elevator.
    pub elevator: bool,
}

/// A stored property listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListing {
    /// Store-assigned identifier.
    pub id: i64,
    /// Agency reference code (e.g. `REF-0001`).
    pub reference: Option<String>,
    /// Street address.
    pub address: String,
    /// City or town.
    pub city: String,
    /// Province or region.
    pub province: String,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Kind of property.
    pub property_type: PropertyType,
    /// Sale, rental, or both.
    pub operation_type: OperationType,
    /// Availability status.
    pub status: ListingStatus,
    /// Asking price (sale) or monthly rent (rental). Never negative.
    pub price: Decimal,
    /// ISO currency code of `price`.
    pub currency: String,
    /// Number of bedrooms.
    pub bedrooms: u32,
    /// Number of bathrooms.
    pub bathrooms: u32,
    /// Built area in square metres, when known.
    pub area_sqm: Option<u32>,
    /// Year of construction.
    pub year_built: Option<i32>,
    /// Floor number (0 = ground floor).
    pub floor: Option<i32>,
    /// Heating system description.
    pub heating: Option<String>,
    /// Latitude (WGS84).
    pub latitude: Option<f64>,
    /// Longitude (WGS84).
    pub longitude: Option<f64>,
    /// Amenity flags.
    #[serde(flatten)]
    pub amenities: Amenities,
    /// The owner this listing references, if any.
    pub owner_id: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A listing as returned by read operations, with its owner summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    /// The listing itself.
    #[serde(flatten)]
    pub listing: PropertyListing,
    /// Summary of the referenced owner.
    pub owner: Option<OwnerSummary>,
}

impl ListingRecord {
    /// Wraps a listing with no owner summary.
    pub fn without_owner(listing: PropertyListing) -> Self {
        Self {
            listing,
            owner: None,
        }
    }
}
