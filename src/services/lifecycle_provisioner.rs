use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    domain::{models::RetentionPolicy, value_objects::BucketName},
    ports::repositories::LifecycleRepository,
};

/// What the provisioner did to the bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// A configuration was already present and left untouched
    AlreadyApplied,
    /// The retention policy was installed by this run
    Installed,
    /// Query or install failed; the run carries on regardless
    Failed { reason: String },
}

/// Ensures the destination bucket has a lifecycle configuration
#[derive(Clone)]
pub struct LifecycleProvisioner {
    repository: Arc<dyn LifecycleRepository>,
    bucket: BucketName,
    policy: RetentionPolicy,
}

impl LifecycleProvisioner {
    pub fn new(
        repository: Arc<dyn LifecycleRepository>,
        bucket: BucketName,
        policy: RetentionPolicy,
    ) -> Self {
        Self {
            repository,
            bucket,
            policy,
        }
    }

    /// Install the retention policy unless the bucket already has a
    /// configuration. An existing configuration is never compared or updated.
    pub async fn provision(&self) -> ProvisionOutcome {
        let bucket = &self.bucket;

        match self.repository.get_configuration(bucket).await {
            Ok(Some(existing)) => {
                info!(%bucket, rules = existing.rules.len(), "lifecycle policy already applied");
                return ProvisionOutcome::AlreadyApplied;
            }
            Ok(None) => {}
            Err(e) => {
                // Never install over a configuration that could not be read
                warn!(%bucket, error = %e, "lifecycle policy query failed, not installing");
                return ProvisionOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        }

        if let Err(e) = self.policy.validate() {
            warn!(%bucket, error = %e, "invalid lifecycle policy settings, not installing");
            return ProvisionOutcome::Failed {
                reason: e.to_string(),
            };
        }

        let config = self.policy.to_configuration();
        match self.repository.save_configuration(bucket, &config).await {
            Ok(()) => {
                info!(
                    %bucket,
                    transition_days = self.policy.transition_days,
                    expiration_days = self.policy.expiration_days,
                    storage_class = %self.policy.storage_class,
                    "lifecycle policy installed"
                );
                ProvisionOutcome::Installed
            }
            Err(e) => {
                warn!(%bucket, error = %e, "lifecycle policy install failed");
                ProvisionOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
