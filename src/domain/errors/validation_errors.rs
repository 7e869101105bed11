/// Validation errors for domain value objects
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // ObjectKey validation errors
    EmptyObjectKey,
    ObjectKeyTooLong {
        actual: usize,
        max: usize,
    },
    InvalidObjectKeyCharacter(char),
    ObjectKeyStartsWithSlash,
    ObjectKeyContainsDoubleSlash,

    // BucketName validation errors
    BucketNameTooShort {
        actual: usize,
        min: usize,
    },
    BucketNameTooLong {
        actual: usize,
        max: usize,
    },
    BucketNameInvalidStart,
    BucketNameInvalidEnd,
    BucketNameInvalidCharacter(char),
    BucketNameAdjacentPeriods,
    BucketNameLooksLikeIpAddress,

    // LogId validation errors
    EmptyJobName,
    EmptyBuildNumber,
    BuildNumberContainsSeparator {
        build: String,
        separator: char,
    },
    LineBreakInIdentifier(String),
    MalformedLogId(String),

    // Lifecycle validation errors
    DuplicateRuleId(String),
    RuleIdTooLong(String),
    NoActionsInRule(String),
    ZeroDays {
        field: String,
    },
    TransitionNotBeforeExpiration {
        transition_days: u32,
        expiration_days: u32,
    },
    EmptyStorageClass,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ObjectKey errors
            ValidationError::EmptyObjectKey => write!(f, "Object key cannot be empty"),
            ValidationError::ObjectKeyTooLong { actual, max } => {
                write!(f, "Object key too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::InvalidObjectKeyCharacter(c) => {
                write!(f, "Invalid character in object key: {:?}", c)
            }
            ValidationError::ObjectKeyStartsWithSlash => {
                write!(f, "Object key cannot start with '/'")
            }
            ValidationError::ObjectKeyContainsDoubleSlash => {
                write!(f, "Object key cannot contain '//'")
            }

            // BucketName errors
            ValidationError::BucketNameTooShort { actual, min } => {
                write!(
                    f,
                    "Bucket name too short: {} characters (min: {})",
                    actual, min
                )
            }
            ValidationError::BucketNameTooLong { actual, max } => {
                write!(
                    f,
                    "Bucket name too long: {} characters (max: {})",
                    actual, max
                )
            }
            ValidationError::BucketNameInvalidStart => {
                write!(f, "Bucket name must start with lowercase letter or number")
            }
            ValidationError::BucketNameInvalidEnd => {
                write!(f, "Bucket name must end with lowercase letter or number")
            }
            ValidationError::BucketNameInvalidCharacter(c) => {
                write!(
                    f,
                    "Invalid character in bucket name: '{}'. Only lowercase letters, numbers, periods and hyphens allowed",
                    c
                )
            }
            ValidationError::BucketNameAdjacentPeriods => {
                write!(f, "Bucket name cannot contain two adjacent periods")
            }
            ValidationError::BucketNameLooksLikeIpAddress => {
                write!(f, "Bucket name cannot be formatted as an IP address")
            }

            // LogId errors
            ValidationError::EmptyJobName => write!(f, "Job name cannot be empty"),
            ValidationError::EmptyBuildNumber => write!(f, "Build number cannot be empty"),
            ValidationError::BuildNumberContainsSeparator { build, separator } => {
                write!(
                    f,
                    "Build number '{}' contains the identifier separator '{}'",
                    build, separator
                )
            }
            ValidationError::LineBreakInIdentifier(value) => {
                write!(f, "Line break in log identifier component: {:?}", value)
            }
            ValidationError::MalformedLogId(value) => {
                write!(f, "Malformed log identifier: {:?}", value)
            }

            // Lifecycle errors
            ValidationError::DuplicateRuleId(id) => {
                write!(f, "Duplicate lifecycle rule ID: {}", id)
            }
            ValidationError::RuleIdTooLong(id) => {
                write!(f, "Lifecycle rule ID too long (max 255 characters): {}", id)
            }
            ValidationError::NoActionsInRule(id) => {
                write!(f, "Lifecycle rule '{}' has no actions defined", id)
            }
            ValidationError::ZeroDays { field } => {
                write!(f, "Lifecycle '{}' must be at least one day", field)
            }
            ValidationError::TransitionNotBeforeExpiration {
                transition_days,
                expiration_days,
            } => {
                write!(
                    f,
                    "Transition after {} days must happen before expiration after {} days",
                    transition_days, expiration_days
                )
            }
            ValidationError::EmptyStorageClass => {
                write!(f, "Transition storage class cannot be empty")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
