use std::path::PathBuf;
use thiserror::Error as ThisError;

/// Errors raised by transfer-state stores
#[derive(ThisError, Debug)]
pub enum StateError {
    #[error("Failed to open transfer state at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to append to transfer state at {path}: {source}")]
    Append {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Transfer state database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for transfer-state operations
pub type StateResult<T> = Result<T, StateError>;
