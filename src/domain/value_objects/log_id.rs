use crate::domain::errors::ValidationError;

/// Identifier of an uploaded log as persisted in the transfer state.
///
/// The textual form is `{job}-{build}`. Build numbers never contain the
/// separator, so splitting at the last separator recovers both parts and
/// two different (job, build) pairs never share an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogId(String);

impl LogId {
    pub const SEPARATOR: char = '-';

    /// Build the identifier for a job/build pair
    pub fn new(job: &str, build: &str) -> Result<Self, ValidationError> {
        if job.is_empty() {
            return Err(ValidationError::EmptyJobName);
        }

        if build.is_empty() {
            return Err(ValidationError::EmptyBuildNumber);
        }

        if build.contains(Self::SEPARATOR) {
            return Err(ValidationError::BuildNumberContainsSeparator {
                build: build.to_string(),
                separator: Self::SEPARATOR,
            });
        }

        for part in [job, build] {
            if part.contains(['\n', '\r']) {
                return Err(ValidationError::LineBreakInIdentifier(part.to_string()));
            }
        }

        Ok(Self(format!("{}{}{}", job, Self::SEPARATOR, build)))
    }

    /// Parse a persisted identifier line
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let (job, build) = value
            .rsplit_once(Self::SEPARATOR)
            .ok_or_else(|| ValidationError::MalformedLogId(value.to_string()))?;
        Self::new(job, build)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
