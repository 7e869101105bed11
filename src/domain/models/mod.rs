pub mod lifecycle;
pub mod log_record;
pub mod run_summary;

pub use lifecycle::{
    LifecycleConfiguration, LifecycleRule, RetentionPolicy, RuleStatus, StorageClass, Transition,
    TIERED_RETENTION_RULE_ID,
};
pub use log_record::LogRecord;
pub use run_summary::{FailedTransfer, RunSummary};
