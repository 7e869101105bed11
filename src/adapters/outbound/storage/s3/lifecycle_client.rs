use async_trait::async_trait;
use aws_sdk_s3::error::{BuildError, DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::types::{
    BucketLifecycleConfiguration, ExpirationStatus, LifecycleExpiration,
    LifecycleRule as S3LifecycleRule, LifecycleRuleFilter, Transition as S3Transition,
    TransitionStorageClass,
};
use aws_sdk_s3::Client as S3Client;
use tracing::debug;

use crate::{
    domain::{
        errors::{LifecycleError, LifecycleResult},
        models::{LifecycleConfiguration, LifecycleRule, RuleStatus, StorageClass, Transition},
        value_objects::BucketName,
    },
    ports::repositories::LifecycleRepository,
};

/// Error code S3 answers with when a bucket has no lifecycle configuration
const NO_SUCH_LIFECYCLE_CONFIGURATION: &str = "NoSuchLifecycleConfiguration";

/// Bucket lifecycle configuration through the AWS SDK
pub struct S3LifecycleClient {
    client: S3Client,
}

impl S3LifecycleClient {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

fn encoding_error(e: BuildError) -> LifecycleError {
    LifecycleError::EncodingFailed {
        message: e.to_string(),
    }
}

fn days_to_sdk(days: u32) -> LifecycleResult<i32> {
    i32::try_from(days).map_err(|_| LifecycleError::EncodingFailed {
        message: format!("{} days is out of range", days),
    })
}

fn days_from_sdk(days: i32) -> LifecycleResult<u32> {
    u32::try_from(days).map_err(|_| LifecycleError::MalformedDocument {
        message: format!("negative day count {}", days),
    })
}

fn rule_to_sdk(rule: &LifecycleRule) -> LifecycleResult<S3LifecycleRule> {
    // An empty filter applies the rule to every object in the bucket
    let filter = match &rule.prefix {
        Some(prefix) => LifecycleRuleFilter::builder().prefix(prefix).build(),
        None => LifecycleRuleFilter::builder().build(),
    };

    let status = match rule.status {
        RuleStatus::Enabled => ExpirationStatus::Enabled,
        RuleStatus::Disabled => ExpirationStatus::Disabled,
    };

    let mut builder = S3LifecycleRule::builder()
        .id(&rule.id)
        .status(status)
        .filter(filter);

    for transition in &rule.transitions {
        builder = builder.transitions(
            S3Transition::builder()
                .days(days_to_sdk(transition.days)?)
                .storage_class(TransitionStorageClass::from(transition.storage_class.as_str()))
                .build(),
        );
    }

    if let Some(days) = rule.expiration_days {
        builder = builder.expiration(LifecycleExpiration::builder().days(days_to_sdk(days)?).build());
    }

    builder.build().map_err(encoding_error)
}

fn rule_from_sdk(rule: &S3LifecycleRule) -> LifecycleResult<LifecycleRule> {
    let transitions = rule
        .transitions()
        .iter()
        // Date-based transitions have no day count to report
        .filter_map(|t| Some((t.days()?, t.storage_class()?)))
        .map(|(days, class)| {
            Ok(Transition {
                days: days_from_sdk(days)?,
                storage_class: StorageClass::parse(class.as_str()),
            })
        })
        .collect::<LifecycleResult<Vec<_>>>()?;

    let expiration_days = rule
        .expiration()
        .and_then(|e| e.days())
        .map(days_from_sdk)
        .transpose()?;

    Ok(LifecycleRule {
        id: rule.id().unwrap_or_default().to_string(),
        status: RuleStatus::parse(rule.status().as_str()),
        prefix: rule
            .filter()
            .and_then(|f| f.prefix())
            .filter(|p| !p.is_empty())
            .map(str::to_string),
        transitions,
        expiration_days,
    })
}

#[async_trait]
impl LifecycleRepository for S3LifecycleClient {
    async fn get_configuration(
        &self,
        bucket: &BucketName,
    ) -> LifecycleResult<Option<LifecycleConfiguration>> {
        let result = self
            .client
            .get_bucket_lifecycle_configuration()
            .bucket(bucket.as_str())
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(err) => {
                let code = err.as_service_error().and_then(|e| e.code());
                if code == Some(NO_SUCH_LIFECYCLE_CONFIGURATION) {
                    debug!(%bucket, "bucket has no lifecycle configuration");
                    return Ok(None);
                }

                return Err(LifecycleError::QueryFailed {
                    bucket: bucket.clone(),
                    message: DisplayErrorContext(&err).to_string(),
                });
            }
        };

        let rules = output
            .rules()
            .iter()
            .map(rule_from_sdk)
            .collect::<LifecycleResult<Vec<_>>>()?;

        Ok(Some(LifecycleConfiguration { rules }))
    }

    async fn save_configuration(
        &self,
        bucket: &BucketName,
        config: &LifecycleConfiguration,
    ) -> LifecycleResult<()> {
        config.validate().map_err(|e| LifecycleError::InvalidRule {
            rule_id: String::new(),
            reason: e.to_string(),
        })?;

        let rules = config
            .rules
            .iter()
            .map(rule_to_sdk)
            .collect::<LifecycleResult<Vec<_>>>()?;

        let document = BucketLifecycleConfiguration::builder()
            .set_rules(Some(rules))
            .build()
            .map_err(encoding_error)?;

        self.client
            .put_bucket_lifecycle_configuration()
            .bucket(bucket.as_str())
            .lifecycle_configuration(document)
            .send()
            .await
            .map_err(|err| LifecycleError::InstallFailed {
                bucket: bucket.clone(),
                message: DisplayErrorContext(&err).to_string(),
            })?;

        debug!(%bucket, rules = config.rules.len(), "lifecycle configuration installed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::RetentionPolicy;

    #[test]
    fn test_rule_conversion_keeps_the_policy() {
        let config = RetentionPolicy::default().to_configuration();
        let rule = &config.rules[0];

        let sdk_rule = rule_to_sdk(rule).unwrap();
        assert_eq!(sdk_rule.status(), &ExpirationStatus::Enabled);
        assert_eq!(sdk_rule.transitions()[0].days(), Some(30));
        assert_eq!(
            sdk_rule.transitions()[0].storage_class(),
            Some(&TransitionStorageClass::Glacier)
        );
        assert_eq!(sdk_rule.expiration().and_then(|e| e.days()), Some(365));
        assert_eq!(sdk_rule.filter().and_then(|f| f.prefix()), None);

        assert_eq!(&rule_from_sdk(&sdk_rule).unwrap(), rule);
    }

    #[test]
    fn test_prefixed_rule_keeps_its_prefix() {
        let rule = LifecycleRule {
            id: "logs".to_string(),
            status: RuleStatus::Disabled,
            prefix: Some("jenkins/".to_string()),
            transitions: vec![],
            expiration_days: Some(10),
        };

        let sdk_rule = rule_to_sdk(&rule).unwrap();
        assert_eq!(sdk_rule.filter().and_then(|f| f.prefix()), Some("jenkins/"));
        assert_eq!(rule_from_sdk(&sdk_rule).unwrap(), rule);
    }
}
