//! Record identifier path extractor.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::RestError;

/// The numeric `{id}` path segment of a listing or owner route.
///
/// A segment that is not an integer is rejected with 400 `Invalid
/// identifier` before any store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let invalid = || RestError::BadRequest {
            message: "Invalid identifier".to_string(),
        };
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid())?;
        raw.trim().parse().map(RecordId).map_err(|_| invalid())
    }
}
