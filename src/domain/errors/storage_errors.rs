use crate::domain::value_objects::ObjectKey;
use thiserror::Error as ThisError;

/// Errors that can occur during object storage operations
#[derive(ThisError, Debug, Clone)]
pub enum StorageError {
    /// Object not found
    #[error("Object not found: {key}")]
    ObjectNotFound { key: ObjectKey },

    /// Access denied by the storage service
    #[error("Access denied for operation '{operation}': {message}")]
    AccessDenied { operation: String, message: String },

    /// The store did not answer the capability probe
    #[error("Storage backend unreachable: {message}")]
    Unreachable { message: String },

    /// Validation error
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    /// Infrastructure error with external source
    #[error("Infrastructure error: {message}")]
    InfrastructureError {
        message: String,
        source_message: Option<String>, // Kept as a string so the error stays Clone
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
