//! CSV rendering of listing exports.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use realty_persistence::types::ListingRecord;
use thiserror::Error;
use tracing::error;

use crate::error::RestError;

/// File name offered to the browser.
pub const EXPORT_FILE_NAME: &str = "listings.csv";

/// Header row of the export.
pub const EXPORT_HEADER: [&str; 15] = [
    "ID",
    "Reference",
    "Address",
    "City",
    "Province",
    "Type",
    "Bedrooms",
    "Bathrooms",
    "AreaSqm",
    "Price",
    "OperationType",
    "Status",
    "Pool",
    "Garage",
    "Owner",
];

// Lets spreadsheet applications detect UTF-8
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Failure while rendering an export.
#[derive(Debug, Error)]
pub enum CsvExportError {
    /// A row could not be written.
    #[error("failed to write CSV row: {0}")]
    Write(#[from] csv::Error),

    /// The buffered output could not be flushed.
    #[error("failed to flush CSV output: {0}")]
    Flush(String),
}

impl From<CsvExportError> for RestError {
    fn from(err: CsvExportError) -> Self {
        error!(error = %err, "CSV export failed");
        RestError::InternalError
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Renders records as a BOM-prefixed CSV document. Fields are quoted by the
/// writer only when needed.
pub fn render_listings(records: &[ListingRecord]) -> Result<Vec<u8>, CsvExportError> {
    let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());
    writer.write_record(EXPORT_HEADER)?;

    for record in records {
        let listing = &record.listing;
        writer.write_record([
            listing.id.to_string(),
            listing.reference.clone().unwrap_or_default(),
            listing.address.clone(),
            listing.city.clone(),
            listing.province.clone(),
            listing.property_type.as_str().to_string(),
            listing.bedrooms.to_string(),
            listing.bathrooms.to_string(),
            listing.area_sqm.map(|a| a.to_string()).unwrap_or_default(),
            listing.price.to_string(),
            listing.operation_type.as_str().to_string(),
            listing.status.as_str().to_string(),
            yes_no(listing.amenities.pool).to_string(),
            yes_no(listing.amenities.garage).to_string(),
            record
                .owner
                .as_ref()
                .map(|o| o.name.clone())
                .unwrap_or_default(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| CsvExportError::Flush(e.error().to_string()))
}

/// A rendered export, sent as a file download.
#[derive(Debug, Clone)]
pub struct CsvDownload(pub Vec<u8>);

impl IntoResponse for CsvDownload {
    fn into_response(self) -> Response {
        let headers = [
            (header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", EXPORT_FILE_NAME),
            ),
        ];
        (StatusCode::OK, headers, self.0).into_response()
    }
}
