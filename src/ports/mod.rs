pub mod notification;
pub mod repositories;
pub mod source;
pub mod storage;

// Re-export all port traits for convenience
pub use notification::{Notification, NotificationLevel, Notifier};
pub use repositories::{LifecycleRepository, TransferStateOpener, TransferStateRepository};
pub use source::LogSource;
pub use storage::ObjectStore;
