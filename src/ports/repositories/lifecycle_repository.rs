use crate::domain::{
    errors::LifecycleResult, models::LifecycleConfiguration, value_objects::BucketName,
};
use async_trait::async_trait;

/// Where a bucket's lifecycle configuration lives.
///
/// The configuration itself is owned by the storage service; this port only
/// reads it and installs a new one.
#[async_trait]
pub trait LifecycleRepository: Send + Sync + 'static {
    /// Retrieve the lifecycle configuration for a bucket, `None` if it has none
    async fn get_configuration(
        &self,
        bucket: &BucketName,
    ) -> LifecycleResult<Option<LifecycleConfiguration>>;

    /// Install a lifecycle configuration on a bucket
    async fn save_configuration(
        &self,
        bucket: &BucketName,
        config: &LifecycleConfiguration,
    ) -> LifecycleResult<()>;

    /// Check if a lifecycle configuration exists for a bucket
    async fn configuration_exists(&self, bucket: &BucketName) -> LifecycleResult<bool> {
        Ok(self.get_configuration(bucket).await?.is_some())
    }
}
