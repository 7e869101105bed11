use crate::domain::errors::ValidationError;

/// A validated bucket name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

impl BucketName {
    /// Create a new BucketName following the S3 general-purpose bucket naming rules
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();

        if value.len() < 3 {
            return Err(ValidationError::BucketNameTooShort {
                actual: value.len(),
                min: 3,
            });
        }

        if value.len() > 63 {
            return Err(ValidationError::BucketNameTooLong {
                actual: value.len(),
                max: 63,
            });
        }

        let is_edge_char = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();

        if !value.chars().next().is_some_and(is_edge_char) {
            return Err(ValidationError::BucketNameInvalidStart);
        }

        if !value.chars().last().is_some_and(is_edge_char) {
            return Err(ValidationError::BucketNameInvalidEnd);
        }

        if let Some(c) = value
            .chars()
            .find(|&c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.'))
        {
            return Err(ValidationError::BucketNameInvalidCharacter(c));
        }

        if value.contains("..") {
            return Err(ValidationError::BucketNameAdjacentPeriods);
        }

        if Self::looks_like_ip_address(&value) {
            return Err(ValidationError::BucketNameLooksLikeIpAddress);
        }

        Ok(Self(value))
    }

    /// Get the bucket name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn looks_like_ip_address(s: &str) -> bool {
        let parts: Vec<&str> = s.split('.').collect();
        parts.len() == 4 && parts.iter().all(|part| part.parse::<u8>().is_ok())
    }
}

impl std::fmt::Display for BucketName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for BucketName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bucket_names() {
        assert!(BucketName::new("ci-logs").is_ok());
        assert!(BucketName::new("jenkins.build.logs").is_ok());
        assert!(BucketName::new("123logs").is_ok());
    }

    #[test]
    fn test_invalid_bucket_names() {
        assert_eq!(
            BucketName::new("ab"),
            Err(ValidationError::BucketNameTooShort { actual: 2, min: 3 })
        );
        assert!(BucketName::new("a".repeat(64)).is_err());
        assert_eq!(
            BucketName::new("-logs"),
            Err(ValidationError::BucketNameInvalidStart)
        );
        assert_eq!(
            BucketName::new("logs."),
            Err(ValidationError::BucketNameInvalidEnd)
        );
        assert_eq!(
            BucketName::new("CI-logs"),
            Err(ValidationError::BucketNameInvalidStart)
        );
        assert_eq!(
            BucketName::new("ci_logs"),
            Err(ValidationError::BucketNameInvalidCharacter('_'))
        );
        assert_eq!(
            BucketName::new("ci..logs"),
            Err(ValidationError::BucketNameAdjacentPeriods)
        );
        assert_eq!(
            BucketName::new("10.0.0.12"),
            Err(ValidationError::BucketNameLooksLikeIpAddress)
        );
    }
}
