//! Error types for the pet store REST API.
//!
//! Storage errors from the persistence layer are mapped to HTTP status
//! codes here, and every error renders as the same JSON envelope:
//!
//! ```json
//! { "error": { "code": "...", "message": "...", "fields": [...] } }
//! ```
//!
//! # Error Mapping
//!
//! | Error | HTTP Status | Code |
//! |-------|-------------|------|
//! | NotFound | 404 | not-found |
//! | Validation | 400 | invalid |
//! | BadRequest | 400 | invalid |
//! | Internal | 500 | internal |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use petstore_model::FieldError;
use petstore_persistence::{ResourceError, StorageError, ValidationError};
use std::fmt;

use crate::links::PathError;

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Pet not found (HTTP 404).
    NotFound {
        /// The pet ID.
        id: String,
    },

    /// Field-level validation failures (HTTP 400).
    Validation {
        /// Every problem found, with field paths.
        errors: Vec<FieldError>,
    },

    /// Malformed request (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    Internal {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { id } => {
                write!(f, "Pet not found: {}", id)
            }
            RestError::Validation { errors } => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                write!(f, "Validation failed for: {}", fields.join(", "))
            }
            RestError::BadRequest { message } => {
                write!(f, "Bad request: {}", message)
            }
            RestError::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            RestError::NotFound { id } => (
                StatusCode::NOT_FOUND,
                "not-found",
                format!("Pet {} not found", id),
                None,
            ),
            RestError::Validation { errors } => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                let message = format!("Validation failed for: {}", fields.join(", "));
                (StatusCode::BAD_REQUEST, "invalid", message, Some(errors))
            }
            RestError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, "invalid", message, None)
            }
            RestError::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", message, None)
            }
        };

        let mut error = serde_json::json!({
            "code": code,
            "message": message,
        });
        if let Some(fields) = fields
            && let Ok(value) = serde_json::to_value(&fields)
        {
            error["fields"] = value;
        }

        (status, Json(serde_json::json!({ "error": error }))).into_response()
    }
}

/// Creates an internal error with the given message.
pub fn internal_error(message: impl Into<String>) -> RestError {
    RestError::Internal {
        message: message.into(),
    }
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Resource(ResourceError::NotFound { id }) => RestError::NotFound { id },
            StorageError::Validation(e) => e.into(),
            StorageError::Backend(e) => {
                tracing::error!(error = %e, "storage backend error");
                internal_error("Storage backend error")
            }
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        let errors = match err {
            ValidationError::UnknownFilterFields { fields } => fields
                .into_iter()
                .map(|f| FieldError::new(format!("filters[{}]", f), "unknown filter field"))
                .collect(),
            ValidationError::UnknownSortFields { fields } => fields
                .into_iter()
                .map(|f| FieldError::new(format!("sort[{}]", f), "unknown sort field"))
                .collect(),
            ValidationError::InvalidField { field, message } => {
                vec![FieldError::new(field, message)]
            }
        };
        RestError::Validation { errors }
    }
}

impl From<PathError> for RestError {
    fn from(err: PathError) -> Self {
        // A route the link layer cannot generate is a wiring mistake,
        // not a client problem.
        tracing::error!(error = %err, "link path generation failed");
        internal_error("Link generation failed")
    }
}
