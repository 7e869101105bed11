use std::path::PathBuf;
use std::time::SystemTime;

use crate::domain::{errors::ValidationError, value_objects::LogId};

/// A completed build log discovered in the source tree
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub job_name: String,
    pub build_number: String,
    /// Location of the log content, relative to the source root
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl LogRecord {
    /// Identifier under which this log is tracked in the transfer state
    pub fn id(&self) -> Result<LogId, ValidationError> {
        LogId::new(&self.job_name, &self.build_number)
    }
}
