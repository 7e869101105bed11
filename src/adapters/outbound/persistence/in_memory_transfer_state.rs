use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{errors::StateResult, value_objects::LogId},
    ports::repositories::TransferStateRepository,
};

/// In-memory transfer state for testing and dry runs
#[derive(Clone, Default)]
pub struct InMemoryTransferState {
    data: Arc<RwLock<StateData>>,
}

#[derive(Default)]
struct StateData {
    entries: HashSet<LogId>,
    // Append log, in record order
    appended: Vec<LogId>,
}

impl InMemoryTransferState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State pre-populated as if a previous run had uploaded `ids`
    pub fn with_entries(ids: impl IntoIterator<Item = LogId>) -> Self {
        let data = StateData {
            entries: ids.into_iter().collect(),
            appended: Vec::new(),
        };
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// Identifiers recorded through this instance, in order
    pub async fn appended(&self) -> Vec<LogId> {
        self.data.read().await.appended.clone()
    }
}

#[async_trait]
impl TransferStateRepository for InMemoryTransferState {
    async fn contains(&self, id: &LogId) -> StateResult<bool> {
        Ok(self.data.read().await.entries.contains(id))
    }

    async fn record(&self, id: &LogId) -> StateResult<()> {
        let mut data = self.data.write().await;
        data.appended.push(id.clone());
        data.entries.insert(id.clone());
        Ok(())
    }

    async fn len(&self) -> StateResult<usize> {
        Ok(self.data.read().await.entries.len())
    }
}
