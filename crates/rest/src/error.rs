//! Error types for the listing API.
//!
//! Every failure leaves the server as a JSON body of the form
//! `{"success": false, "message": "...", "errors": [...]}`, where `errors`
//! only appears for field-level validation failures.
//!
//! # Error Mapping
//!
//! | Storage Error | HTTP Status |
//! |--------------|-------------|
//! | NotFound | 404 |
//! | Referenced | 409 |
//! | InvalidInput / InvalidReference | 400 |
//! | Unavailable | 503 |
//! | any other BackendError | 500 |
//!
//! Backend failures are logged with their full detail and answered with a
//! generic message.

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use realty_persistence::error::{
    BackendError, RecordKind, ResourceError, StorageError, ValidationDetail, ValidationError,
};
use serde::Serialize;
use tracing::error;

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Record or route not found (HTTP 404).
    NotFound {
        /// Error message.
        message: String,
    },

    /// Malformed request (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// A request body failed field validation (HTTP 400).
    Validation {
        /// Summary message.
        message: String,
        /// One entry per offending field.
        details: Vec<ValidationDetail>,
    },

    /// The record cannot be changed in its current state (HTTP 409).
    Conflict {
        /// Error message.
        message: String,
    },

    /// The database is not available (HTTP 503).
    ServiceUnavailable,

    /// Internal server error (HTTP 500).
    InternalError,
}

/// Result type alias for REST handlers.
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    /// Not-found error for a record kind.
    pub fn record_not_found(kind: RecordKind) -> Self {
        let message = match kind {
            RecordKind::Listing => "Listing not found",
            RecordKind::Owner => "Owner not found",
        };
        RestError::NotFound {
            message: message.to_string(),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } | RestError::Validation { .. } => {
                StatusCode::BAD_REQUEST
            }
            RestError::Conflict { .. } => StatusCode::CONFLICT,
            RestError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            RestError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { message }
            | RestError::BadRequest { message }
            | RestError::Validation { message, .. }
            | RestError::Conflict { message } => write!(f, "{}", message),
            RestError::ServiceUnavailable => write!(f, "Service unavailable"),
            RestError::InternalError => write!(f, "Internal server error"),
        }
    }
}

impl std::error::Error for RestError {}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError<'a>>>,
}

#[derive(Serialize)]
struct FieldError<'a> {
    field: &'a str,
    message: &'a str,
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let errors = match &self {
            RestError::Validation { details, .. } => Some(
                details
                    .iter()
                    .map(|d| FieldError {
                        field: &d.field,
                        message: &d.message,
                    })
                    .collect(),
            ),
            _ => None,
        };
        let body = ErrorBody {
            success: false,
            message: self.to_string(),
            errors,
        };
        (status, Json(body)).into_response()
    }
}

// Conversions from storage errors

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Resource(e) => e.into(),
            StorageError::Validation(e) => e.into(),
            StorageError::Backend(e) => e.into(),
        }
    }
}

impl From<ResourceError> for RestError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { kind, .. } => RestError::record_not_found(kind),
            ResourceError::Referenced { count, .. } => RestError::Conflict {
                message: format!(
                    "Owner still has {} listing(s); reassign or delete them first",
                    count
                ),
            },
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidInput { message, details } => {
                RestError::Validation { message, details }
            }
            ValidationError::InvalidReference { field, id } => RestError::Validation {
                message: "Validation failed".to_string(),
                details: vec![ValidationDetail::new(
                    field.clone(),
                    format!("{} {} does not exist", field, id),
                )],
            },
        }
    }
}

impl From<BackendError> for RestError {
    fn from(err: BackendError) -> Self {
        error!(error = %err, "Storage backend error");
        match err {
            BackendError::Unavailable { .. } | BackendError::ConnectionFailed { .. } => {
                RestError::ServiceUnavailable
            }
            BackendError::Internal { .. }
            | BackendError::QueryError { .. }
            | BackendError::SerializationError { .. } => RestError::InternalError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RestError::record_not_found(RecordKind::Listing).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RestError::Conflict {
                message: "x".to_string()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            RestError::ServiceUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_not_found_message_names_kind() {
        assert_eq!(
            RestError::record_not_found(RecordKind::Owner).to_string(),
            "Owner not found"
        );
    }

    #[test]
    fn test_referenced_maps_to_conflict() {
        let err: RestError = StorageError::from(ResourceError::Referenced {
            kind: RecordKind::Owner,
            id: 1,
            count: 4,
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert!(err.to_string().contains('4'));
    }

    #[test]
    fn test_invalid_reference_reports_field() {
        let err: RestError = ValidationError::InvalidReference {
            field: "ownerId".to_string(),
            id: 99,
        }
        .into();
        match err {
            RestError::Validation { details, .. } => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "ownerId");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_backend_errors_hide_detail() {
        let err: RestError = BackendError::QueryError {
            message: "no such table: listings".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error");

        let err: RestError = BackendError::Unavailable {
            backend_name: "sqlite".to_string(),
            message: "disconnected".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
