use crate::domain::{errors::StorageResult, value_objects::ObjectKey};
use async_trait::async_trait;
use bytes::Bytes;

/// Port for the destination object storage.
/// This abstracts the actual storage backend (S3, in-memory, ...)
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Trivial request proving the backend is reachable and the bucket usable
    async fn probe(&self) -> StorageResult<()>;

    /// Store object data, overwriting any existing object under the key
    async fn put_object(
        &self,
        key: &ObjectKey,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StorageResult<()>;

    /// Retrieve object data
    async fn get_object(&self, key: &ObjectKey) -> StorageResult<Bytes>;

    /// Check if object exists
    async fn object_exists(&self, key: &ObjectKey) -> StorageResult<bool>;
}
