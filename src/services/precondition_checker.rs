use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error as ThisError;
use tracing::{debug, error};

use crate::{
    domain::errors::{StateError, StorageError},
    ports::{
        repositories::{TransferStateOpener, TransferStateRepository},
        source::LogSource,
        storage::ObjectStore,
    },
};

/// Environment problems that stop a run before any work is done
#[derive(ThisError, Debug)]
pub enum PreconditionError {
    #[error("source unavailable: {path} is not an accessible directory")]
    SourceUnavailable { path: PathBuf },

    #[error("storage client unavailable: {0}")]
    StorageUnavailable(#[source] StorageError),

    #[error("transfer state unavailable: {0}")]
    StateUnavailable(#[source] StateError),
}

impl PreconditionError {
    /// Process exit status reported for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::SourceUnavailable { .. } => 3,
            Self::StorageUnavailable(_) => 4,
            Self::StateUnavailable(_) => 5,
        }
    }
}

/// Fail-fast gate run before provisioning and transfer.
///
/// Checks the source, then the storage client, and only then opens the
/// transfer state, which is handed back for the run to use.
#[derive(Clone)]
pub struct PreconditionChecker {
    source: Arc<dyn LogSource>,
    store: Arc<dyn ObjectStore>,
    state: Arc<dyn TransferStateOpener>,
}

impl PreconditionChecker {
    pub fn new(
        source: Arc<dyn LogSource>,
        store: Arc<dyn ObjectStore>,
        state: Arc<dyn TransferStateOpener>,
    ) -> Self {
        Self {
            source,
            store,
            state,
        }
    }

    pub async fn check(&self) -> Result<Arc<dyn TransferStateRepository>, PreconditionError> {
        if !self.source.is_available() {
            let err = PreconditionError::SourceUnavailable {
                path: self.source.root().to_path_buf(),
            };
            error!(error = %err, "precondition failed");
            return Err(err);
        }

        if let Err(e) = self.store.probe().await {
            let err = PreconditionError::StorageUnavailable(e);
            error!(error = %err, "precondition failed");
            return Err(err);
        }

        let state = match self.state.open().await {
            Ok(state) => state,
            Err(e) => {
                let err = PreconditionError::StateUnavailable(e);
                error!(error = %err, "precondition failed");
                return Err(err);
            }
        };

        debug!(source = %self.source.root().display(), "preconditions satisfied");
        Ok(state)
    }
}
