//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the persistence layer,
//! following a hierarchy that separates resource-state errors, input validation
//! errors and backend errors.
//!
//! Malformed *filter* input is never an error: the search layer degrades it to
//! "no constraint". The errors below only arise from record lookups, mutations
//! and the database itself.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::fmt;

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Resource state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to resource state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested record was not found.
    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: i64 },

    /// The record is still referenced and cannot be removed.
    #[error("{kind} {id} is referenced by {count} listing(s)")]
    Referenced {
        kind: RecordKind,
        id: i64,
        count: u64,
    },
}

/// The kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// A property listing.
    Listing,
    /// A listing owner.
    Owner,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Listing => write!(f, "listing"),
            RecordKind::Owner => write!(f, "owner"),
        }
    }
}

/// Errors related to input validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The submitted record failed validation.
    #[error("invalid input: {message}")]
    InvalidInput {
        message: String,
        details: Vec<ValidationDetail>,
    },

    /// A reference to another record does not resolve.
    #[error("invalid reference: {field} = {id}")]
    InvalidReference { field: String, id: i64 },
}

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetail {
    /// The camelCase name of the offending field.
    pub field: String,
    /// A human-readable error message.
    pub message: String,
}

impl ValidationDetail {
    /// Creates a new validation detail.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable (e.g. disconnected).
    #[error("backend unavailable: {backend_name}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryError { message: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Returns true if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Resource(ResourceError::NotFound { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ResourceError::NotFound {
            kind: RecordKind::Listing,
            id: 42,
        };
        assert_eq!(err.to_string(), "listing not found: 42");
    }

    #[test]
    fn test_referenced_display() {
        let err = ResourceError::Referenced {
            kind: RecordKind::Owner,
            id: 1,
            count: 3,
        };
        assert_eq!(err.to_string(), "owner 1 is referenced by 3 listing(s)");
    }

    #[test]
    fn test_is_not_found() {
        let err: StorageError = ResourceError::NotFound {
            kind: RecordKind::Owner,
            id: 7,
        }
        .into();
        assert!(err.is_not_found());

        let err: StorageError = BackendError::QueryError {
            message: "boom".to_string(),
        }
        .into();
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_transparent_display() {
        let err: StorageError = ValidationError::InvalidReference {
            field: "ownerId".to_string(),
            id: 99,
        }
        .into();
        assert_eq!(err.to_string(), "invalid reference: ownerId = 99");
    }
}
