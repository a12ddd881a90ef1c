//! Listing handlers.
//!
//! - `GET    /api/listings`        - filtered, sorted, paginated listing
//! - `GET    /api/listings/export` - the same filters as a CSV download
//! - `GET    /api/listings/{id}`   - read
//! - `POST   /api/listings`        - create
//! - `PUT    /api/listings/{id}`   - replace
//! - `DELETE /api/listings/{id}`   - delete

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use realty_persistence::core::{RealtyStore, export_listings, list_listings};
use realty_persistence::error::RecordKind;
use realty_persistence::types::ListingInput;
use tracing::{debug, info};

use crate::error::{RestError, RestResult};
use crate::extractors::{JsonBody, ListingQuery, RecordId};
use crate::responses::{CsvDownload, Envelope, csv_export};
use crate::state::AppState;

/// Handler for the paginated listing search.
///
/// Filter values that are blank, malformed or not among the allowed values
/// are ignored rather than rejected, so this endpoint only fails when the
/// store does.
///
/// # Response
///
/// - `200 OK` - `{success, data, pagination}`
pub async fn list_handler<S>(
    State(state): State<AppState<S>>,
    ListingQuery(params): ListingQuery,
) -> RestResult<Response>
where
    S: RealtyStore,
{
    debug!(?params, "Processing listing search request");

    let page = list_listings(state.store(), &params).await?;

    debug!(
        returned = page.data.len(),
        total = page.pagination.total,
        "Listing search completed"
    );
    Ok(Envelope::from(page).into_response())
}

/// Handler for the CSV export.
///
/// Accepts the listing query options; `page` and `limit` are ignored and
/// every matching row is exported in the requested order.
///
/// # Response
///
/// - `200 OK` - `text/csv` attachment named `listings.csv`
pub async fn export_handler<S>(
    State(state): State<AppState<S>>,
    ListingQuery(params): ListingQuery,
) -> RestResult<CsvDownload>
where
    S: RealtyStore,
{
    debug!(?params, "Processing listing export request");

    let records = export_listings(state.store(), &params).await?;
    let body = csv_export::render_listings(&records)?;

    info!(rows = records.len(), bytes = body.len(), "Exported listings");
    Ok(CsvDownload(body))
}

/// Handler for reading one listing with its owner summary.
///
/// # Response
///
/// - `200 OK` - `{success, data}`
/// - `400 Bad Request` - non-numeric id
/// - `404 Not Found`
pub async fn read_handler<S>(
    State(state): State<AppState<S>>,
    RecordId(id): RecordId,
) -> RestResult<Response>
where
    S: RealtyStore,
{
    debug!(id, "Processing listing read request");

    match state.store().find_listing(id).await? {
        Some(record) => Ok(Envelope::data(record).into_response()),
        None => Err(RestError::record_not_found(RecordKind::Listing)),
    }
}

/// Handler for creating a listing.
///
/// # Response
///
/// - `201 Created` - `{success, message, data}`
/// - `400 Bad Request` - validation failures, listed per field
pub async fn create_handler<S>(
    State(state): State<AppState<S>>,
    JsonBody(input): JsonBody<ListingInput>,
) -> RestResult<Response>
where
    S: RealtyStore,
{
    debug!("Processing listing create request");

    let listing = input.validate()?;
    let record = state.store().create_listing(listing).await?;

    info!(id = record.listing.id, "Created listing");
    Ok(Envelope::created("Listing created", record).into_response())
}

/// Handler for replacing a listing.
///
/// # Response
///
/// - `200 OK` - `{success, message, data}`
/// - `400 Bad Request` - validation failures or non-numeric id
/// - `404 Not Found`
pub async fn update_handler<S>(
    State(state): State<AppState<S>>,
    RecordId(id): RecordId,
    JsonBody(input): JsonBody<ListingInput>,
) -> RestResult<Response>
where
    S: RealtyStore,
{
    debug!(id, "Processing listing update request");

    let listing = input.validate()?;
    let record = state.store().update_listing(id, listing).await?;

    info!(id, "Updated listing");
    Ok(Envelope::updated("Listing updated", record).into_response())
}

/// Handler for deleting a listing.
///
/// # Response
///
/// - `200 OK` - `{success, message}`
/// - `404 Not Found`
pub async fn delete_handler<S>(
    State(state): State<AppState<S>>,
    RecordId(id): RecordId,
) -> RestResult<Response>
where
    S: RealtyStore,
{
    debug!(id, "Processing listing delete request");

    state.store().delete_listing(id).await?;

    info!(id, "Deleted listing");
    Ok(Envelope::message("Listing deleted").into_response())
}
