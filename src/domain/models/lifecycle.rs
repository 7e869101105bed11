use crate::domain::errors::ValidationError;

/// Identifier of the tiered-retention rule installed on the bucket
pub const TIERED_RETENTION_RULE_ID: &str = "TransitionToGlacier";

/// Lifecycle configuration for a bucket
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LifecycleConfiguration {
    pub rules: Vec<LifecycleRule>,
}

/// A single lifecycle rule
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LifecycleRule {
    pub id: String,
    pub status: RuleStatus,
    /// Key prefix the rule is restricted to; `None` applies to every object
    pub prefix: Option<String>,
    pub transitions: Vec<Transition>,
    pub expiration_days: Option<u32>,
}

/// Move objects to another storage class after a number of days
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub days: u32,
    pub storage_class: StorageClass,
}

/// Status of a lifecycle rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleStatus {
    Enabled,
    #[default]
    Disabled,
}

impl RuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleStatus::Enabled => "Enabled",
            RuleStatus::Disabled => "Disabled",
        }
    }

    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("enabled") {
            RuleStatus::Enabled
        } else {
            RuleStatus::Disabled
        }
    }
}

/// Storage classes for lifecycle transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageClass {
    InfrequentAccess,
    Glacier,
    GlacierInstantRetrieval,
    DeepArchive,
    Custom(String),
}

impl StorageClass {
    pub fn as_str(&self) -> &str {
        match self {
            StorageClass::InfrequentAccess => "STANDARD_IA",
            StorageClass::Glacier => "GLACIER",
            StorageClass::GlacierInstantRetrieval => "GLACIER_IR",
            StorageClass::DeepArchive => "DEEP_ARCHIVE",
            StorageClass::Custom(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "STANDARD_IA" => StorageClass::InfrequentAccess,
            "GLACIER" => StorageClass::Glacier,
            "GLACIER_IR" => StorageClass::GlacierInstantRetrieval,
            "DEEP_ARCHIVE" => StorageClass::DeepArchive,
            _ => StorageClass::Custom(s.to_string()),
        }
    }
}

impl std::fmt::Display for StorageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of the retention policy the provisioner installs
#[derive(Debug, Clone, PartialEq)]
pub struct RetentionPolicy {
    pub transition_days: u32,
    pub expiration_days: u32,
    pub storage_class: StorageClass,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            transition_days: 30,
            expiration_days: 365,
            storage_class: StorageClass::Glacier,
        }
    }
}

impl RetentionPolicy {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.transition_days == 0 {
            return Err(ValidationError::ZeroDays {
                field: "transition_days".to_string(),
            });
        }

        if self.expiration_days == 0 {
            return Err(ValidationError::ZeroDays {
                field: "expiration_days".to_string(),
            });
        }

        if self.transition_days >= self.expiration_days {
            return Err(ValidationError::TransitionNotBeforeExpiration {
                transition_days: self.transition_days,
                expiration_days: self.expiration_days,
            });
        }

        if self.storage_class.as_str().is_empty() {
            return Err(ValidationError::EmptyStorageClass);
        }

        Ok(())
    }

    /// The bucket-wide configuration document for this policy
    pub fn to_configuration(&self) -> LifecycleConfiguration {
        LifecycleConfiguration {
            rules: vec![LifecycleRule {
                id: TIERED_RETENTION_RULE_ID.to_string(),
                status: RuleStatus::Enabled,
                prefix: None,
                transitions: vec![Transition {
                    days: self.transition_days,
                    storage_class: self.storage_class.clone(),
                }],
                expiration_days: Some(self.expiration_days),
            }],
        }
    }
}

impl LifecycleRule {
    pub fn has_any_action(&self) -> bool {
        !self.transitions.is_empty() || self.expiration_days.is_some()
    }
}

impl LifecycleConfiguration {
    /// Validate the lifecycle configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen_ids = std::collections::HashSet::new();
        for rule in &self.rules {
            if !seen_ids.insert(rule.id.as_str()) {
                return Err(ValidationError::DuplicateRuleId(rule.id.clone()));
            }

            if rule.id.len() > 255 {
                return Err(ValidationError::RuleIdTooLong(rule.id.clone()));
            }

            if !rule.has_any_action() {
                return Err(ValidationError::NoActionsInRule(rule.id.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_document() {
        let config = RetentionPolicy::default().to_configuration();

        assert_eq!(config.rules.len(), 1);
        let rule = &config.rules[0];
        assert_eq!(rule.id, "TransitionToGlacier");
        assert_eq!(rule.status, RuleStatus::Enabled);
        assert_eq!(rule.prefix, None);
        assert_eq!(
            rule.transitions,
            vec![Transition {
                days: 30,
                storage_class: StorageClass::Glacier
            }]
        );
        assert_eq!(rule.expiration_days, Some(365));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_policy_validation() {
        assert!(RetentionPolicy::default().validate().is_ok());

        let policy = RetentionPolicy {
            transition_days: 400,
            ..Default::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(ValidationError::TransitionNotBeforeExpiration { .. })
        ));

        let policy = RetentionPolicy {
            expiration_days: 0,
            ..Default::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(ValidationError::ZeroDays { .. })
        ));
    }

    #[test]
    fn test_configuration_rejects_duplicate_rules() {
        let rule = RetentionPolicy::default().to_configuration().rules[0].clone();
        let config = LifecycleConfiguration {
            rules: vec![rule.clone(), rule],
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::DuplicateRuleId(
                TIERED_RETENTION_RULE_ID.to_string()
            ))
        );
    }
}
