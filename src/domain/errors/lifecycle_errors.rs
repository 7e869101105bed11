use crate::domain::value_objects::BucketName;
use thiserror::Error as ThisError;

/// Errors specific to bucket lifecycle configuration
#[derive(ThisError, Debug, Clone)]
pub enum LifecycleError {
    /// Invalid lifecycle rule configuration
    #[error("Invalid lifecycle rule '{rule_id}': {reason}")]
    InvalidRule { rule_id: String, reason: String },

    /// Querying the bucket configuration failed
    #[error("Failed to query lifecycle configuration for bucket {bucket}: {message}")]
    QueryFailed { bucket: BucketName, message: String },

    /// Installing the bucket configuration failed
    #[error("Failed to set lifecycle configuration for bucket {bucket}: {message}")]
    InstallFailed { bucket: BucketName, message: String },

    /// The service returned a document we could not understand
    #[error("Malformed lifecycle document: {message}")]
    MalformedDocument { message: String },

    /// Serializing the configuration failed
    #[error("Failed to encode lifecycle configuration: {message}")]
    EncodingFailed { message: String },
}

/// Result type for lifecycle operations
pub type LifecycleResult<T> = Result<T, LifecycleError>;
