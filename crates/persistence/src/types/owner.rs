//! Owner types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::listing::PropertyListing;

/// A party referenced by zero or more listings.
///
/// The `listings` collection is a back-reference populated on reads; the owner
/// does not own the listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    /// Store-assigned identifier.
    pub id: i64,
    /// Person or company name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// National identity / tax number.
    pub national_id: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Listings referencing this owner.
    #[serde(default)]
    pub listings: Vec<PropertyListing>,
}

/// The owner fields embedded in listing reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSummary {
    /// Owner identifier.
    pub id: i64,
    /// Owner name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
}

impl From<&Owner> for OwnerSummary {
    fn from(owner: &Owner) -> Self {
        Self {
            id: owner.id,
            name: owner.name.clone(),
            email: owner.email.clone(),
            phone: owner.phone.clone(),
        }
    }
}
