use crate::domain::value_objects::LogId;

/// Counters accumulated by one transfer run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub uploaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<FailedTransfer>,
}

/// A log that was left for the next run
#[derive(Debug, Clone, PartialEq)]
pub struct FailedTransfer {
    /// `None` when the log could not even be identified
    pub id: Option<LogId>,
    pub job_name: String,
    pub build_number: String,
    pub reason: String,
}

impl RunSummary {
    pub fn record_uploaded(&mut self) {
        self.uploaded += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn record_failed(&mut self, failure: FailedTransfer) {
        self.failed += 1;
        self.failures.push(failure);
    }

    /// Number of eligible logs seen during the run
    pub fn total(&self) -> usize {
        self.uploaded + self.skipped + self.failed
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "uploaded={} skipped={} failed={}",
            self.uploaded, self.skipped, self.failed
        )
    }
}
