//! Owner handlers.
//!
//! Owners are read together with their listings. An owner that still has
//! listings cannot be deleted.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use realty_persistence::core::RealtyStore;
use realty_persistence::error::RecordKind;
use realty_persistence::types::OwnerInput;
use tracing::{debug, info};

use crate::error::{RestError, RestResult};
use crate::extractors::{JsonBody, RecordId};
use crate::responses::Envelope;
use crate::state::AppState;

/// `GET /api/owners` - every owner, ordered by name, with listings.
pub async fn list_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: RealtyStore,
{
    debug!("Processing owner list request");
    let owners = state.store().list_owners().await?;
    Ok(Envelope::data(owners).into_response())
}

/// `GET /api/owners/{id}`
pub async fn read_handler<S>(
    State(state): State<AppState<S>>,
    RecordId(id): RecordId,
) -> RestResult<Response>
where
    S: RealtyStore,
{
    debug!(id, "Processing owner read request");

    match state.store().find_owner_by_id(id).await? {
        Some(owner) => Ok(Envelope::data(owner).into_response()),
        None => Err(RestError::record_not_found(RecordKind::Owner)),
    }
}

/// `POST /api/owners` - 201 on success, 400 with per-field errors otherwise.
pub async fn create_handler<S>(
    State(state): State<AppState<S>>,
    JsonBody(input): JsonBody<OwnerInput>,
) -> RestResult<Response>
where
    S: RealtyStore,
{
    debug!("Processing owner create request");

    let owner = input.validate()?;
    let owner = state.store().create_owner(owner).await?;

    info!(id = owner.id, "Created owner");
    Ok(Envelope::created("Owner created", owner).into_response())
}

/// `PUT /api/owners/{id}`
pub async fn update_handler<S>(
    State(state): State<AppState<S>>,
    RecordId(id): RecordId,
    JsonBody(input): JsonBody<OwnerInput>,
) -> RestResult<Response>
where
    S: RealtyStore,
{
    debug!(id, "Processing owner update request");

    let owner = input.validate()?;
    let owner = state.store().update_owner(id, owner).await?;

    info!(id, "Updated owner");
    Ok(Envelope::updated("Owner updated", owner).into_response())
}

/// `DELETE /api/owners/{id}` - 409 while listings still reference the owner.
pub async fn delete_handler<S>(
    State(state): State<AppState<S>>,
    RecordId(id): RecordId,
) -> RestResult<Response>
where
    S: RealtyStore,
{
    debug!(id, "Processing owner delete request");

    state.store().delete_owner(id).await?;

    info!(id, "Deleted owner");
    Ok(Envelope::message("Owner deleted").into_response())
}
