//! Error types for the storage layer.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Resource state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend connectivity and execution errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to resource state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested aggregate was not found.
    ///
    /// `find_by_id` never produces this; it is raised by callers that
    /// require presence (update/delete targets).
    #[error("pet not found: {id}")]
    NotFound { id: String },
}

/// Errors related to query and input validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// One or more filter fields are outside the resource's allow-list.
    #[error("unknown filter field(s): {}", fields.join(", "))]
    UnknownFilterFields { fields: Vec<String> },

    /// One or more sort fields are outside the resource's allow-list.
    #[error("unknown sort field(s): {}", fields.join(", "))]
    UnknownSortFields { fields: Vec<String> },

    /// A scalar field failed validation.
    #[error("invalid field {field}: {message}")]
    InvalidField { field: String, message: String },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Connection pool exhausted.
    #[error("connection pool exhausted for {backend_name}")]
    PoolExhausted { backend_name: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    Serialization { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

impl From<r2d2::Error> for StorageError {
    fn from(_err: r2d2::Error) -> Self {
        StorageError::Backend(BackendError::PoolExhausted {
            backend_name: "sqlite".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StorageError::Resource(ResourceError::NotFound {
            id: "p-123".to_string(),
        });
        assert_eq!(err.to_string(), "pet not found: p-123");
    }

    #[test]
    fn test_unknown_filter_fields_display() {
        let err = ValidationError::UnknownFilterFields {
            fields: vec!["color".to_string(), "weight".to_string()],
        };
        assert_eq!(err.to_string(), "unknown filter field(s): color, weight");
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::PoolExhausted {
            backend_name: "sqlite".to_string(),
        };
        assert!(err.to_string().contains("pool exhausted"));
    }

    #[test]
    fn test_rusqlite_error_converts_to_backend() {
        let err: StorageError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, StorageError::Backend(_)));
    }
}
