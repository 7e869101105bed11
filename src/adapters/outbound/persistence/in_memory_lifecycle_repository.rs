use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{LifecycleError, LifecycleResult},
        models::LifecycleConfiguration,
        value_objects::BucketName,
    },
    ports::repositories::LifecycleRepository,
};

/// In-memory implementation of LifecycleRepository for testing and development
#[derive(Clone, Default)]
pub struct InMemoryLifecycleRepository {
    data: Arc<RwLock<RepositoryData>>,
}

#[derive(Default)]
struct RepositoryData {
    // Map of bucket name -> lifecycle configuration
    configurations: HashMap<String, LifecycleConfiguration>,
    // Number of successful saves, per bucket
    saves: HashMap<String, usize>,
}

impl InMemoryLifecycleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository that already holds a configuration for `bucket`
    pub fn with_configuration(bucket: &BucketName, config: LifecycleConfiguration) -> Self {
        let mut data = RepositoryData::default();
        data.configurations
            .insert(bucket.as_str().to_string(), config);
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// How many times a configuration was written for `bucket`
    pub async fn save_count(&self, bucket: &BucketName) -> usize {
        let data = self.data.read().await;
        data.saves.get(bucket.as_str()).copied().unwrap_or(0)
    }
}

#[async_trait]
impl LifecycleRepository for InMemoryLifecycleRepository {
    async fn get_configuration(
        &self,
        bucket: &BucketName,
    ) -> LifecycleResult<Option<LifecycleConfiguration>> {
        let data = self.data.read().await;
        Ok(data.configurations.get(bucket.as_str()).cloned())
    }

    async fn save_configuration(
        &self,
        bucket: &BucketName,
        config: &LifecycleConfiguration,
    ) -> LifecycleResult<()> {
        // Validate configuration before saving
        config.validate().map_err(|e| LifecycleError::InvalidRule {
            rule_id: String::new(),
            reason: e.to_string(),
        })?;

        let mut data = self.data.write().await;
        data.configurations
            .insert(bucket.as_str().to_string(), config.clone());
        *data.saves.entry(bucket.as_str().to_string()).or_default() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::RetentionPolicy;

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = InMemoryLifecycleRepository::new();
        let bucket = BucketName::new("ci-logs").unwrap();

        assert!(!repo.configuration_exists(&bucket).await.unwrap());

        let config = RetentionPolicy::default().to_configuration();
        repo.save_configuration(&bucket, &config).await.unwrap();

        assert_eq!(repo.get_configuration(&bucket).await.unwrap(), Some(config));
        assert_eq!(repo.save_count(&bucket).await, 1);
    }

    #[tokio::test]
    async fn test_rejects_invalid_configuration() {
        let repo = InMemoryLifecycleRepository::new();
        let bucket = BucketName::new("ci-logs").unwrap();

        let mut config = RetentionPolicy::default().to_configuration();
        config.rules[0].transitions.clear();
        config.rules[0].expiration_days = None;

        assert!(matches!(
            repo.save_configuration(&bucket, &config).await,
            Err(LifecycleError::InvalidRule { .. })
        ));
        assert_eq!(repo.save_count(&bucket).await, 0);
    }
}
