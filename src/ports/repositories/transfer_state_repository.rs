use crate::domain::{errors::StateResult, value_objects::LogId};
use async_trait::async_trait;
use std::sync::Arc;

/// Durable set of logs that have already been uploaded.
///
/// Entries are only ever added. Once `record` returns `Ok` the entry must
/// survive a process crash.
#[async_trait]
pub trait TransferStateRepository: Send + Sync + 'static {
    /// Whether the log was uploaded by a previous (or the current) run
    async fn contains(&self, id: &LogId) -> StateResult<bool>;

    /// Durably append an uploaded log
    async fn record(&self, id: &LogId) -> StateResult<()>;

    /// Number of distinct recorded logs
    async fn len(&self) -> StateResult<usize>;
}

/// Opens the transfer state once the source and storage are known to be usable.
///
/// Opening may create or repair the backing store, so it is deferred until
/// the run is cleared to start.
#[async_trait]
pub trait TransferStateOpener: Send + Sync + 'static {
    async fn open(&self) -> StateResult<Arc<dyn TransferStateRepository>>;
}

/// A repository that is already open
#[async_trait]
impl TransferStateOpener for Arc<dyn TransferStateRepository> {
    async fn open(&self) -> StateResult<Arc<dyn TransferStateRepository>> {
        Ok(self.clone())
    }
}
