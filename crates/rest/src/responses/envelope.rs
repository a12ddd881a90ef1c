//! The `{success, ...}` JSON envelope wrapped around every successful
//! response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use realty_persistence::types::{ListingPage, ListingRecord, PaginationMeta};
use serde::Serialize;

/// A success envelope.
///
/// Absent parts are omitted from the JSON, so a plain read serializes as
/// `{"success": true, "data": ...}` and a delete as
/// `{"success": true, "message": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pagination: Option<PaginationMeta>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T> Envelope<T> {
    /// `200 {success, data}`.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            pagination: None,
            status: StatusCode::OK,
        }
    }

    /// `201 {success, message, data}`.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            message: Some(message.into()),
            status: StatusCode::CREATED,
            ..Self::data(data)
        }
    }

    /// `200 {success, message, data}`.
    pub fn updated(message: impl Into<String>, data: T) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::data(data)
        }
    }

    /// Returns the status code the envelope is sent with.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl Envelope<()> {
    /// `200 {success, message}`.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            pagination: None,
            status: StatusCode::OK,
        }
    }
}

impl From<ListingPage> for Envelope<Vec<ListingRecord>> {
    /// `200 {success, data, pagination}`.
    fn from(page: ListingPage) -> Self {
        Self {
            pagination: Some(page.pagination),
            ..Self::data(page.data)
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
