pub mod lifecycle_provisioner;
pub mod log_walker;
pub mod offload_runner;
pub mod precondition_checker;
pub mod transfer_engine;

pub use lifecycle_provisioner::{LifecycleProvisioner, ProvisionOutcome};
pub use log_walker::{walk_logs, SourceLayout};
pub use offload_runner::{notify_fatal, OffloadRunner, RunReport};
pub use precondition_checker::{PreconditionChecker, PreconditionError};
pub use transfer_engine::{TransferEngine, LOG_CONTENT_TYPE};
