pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    BucketName,
    DomainValidationError,
    // Errors
    LifecycleError,
    // Models
    LifecycleConfiguration,
    LifecycleRule,
    LogId,
    LogRecord,
    // Value objects
    ObjectKey,
    RetentionPolicy,
    RunSummary,
    StateError,
    StorageClass,
    StorageError,
};

// Port types - interfaces for external systems
pub use ports::{
    LifecycleRepository, LogSource, Notification, NotificationLevel, Notifier, ObjectStore,
    TransferStateOpener, TransferStateRepository,
};

// Services - business logic
pub use services::{
    walk_logs, LifecycleProvisioner, OffloadRunner, PreconditionChecker, PreconditionError,
    ProvisionOutcome, RunReport, SourceLayout, TransferEngine,
};

// Application factory and configuration
pub use app::{AppBuilder, AppConfig, AppDependencies, AppError, StateBackend, StorageBackend};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    notify::{MailNotifier, NoopNotifier, NotificationTarget, WebhookNotifier},
    persistence::{
        FileTransferState, InMemoryLifecycleRepository, InMemoryTransferState,
        SqliteTransferState,
    },
    source::{FsLogSource, InMemoryLogSource},
    storage::{create_s3_client, ApacheObjectStoreAdapter, S3Config, S3LifecycleClient},
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        ApacheObjectStoreAdapter, AppBuilder, AppConfig, BucketName, FileTransferState,
        FsLogSource, InMemoryLogSource, InMemoryTransferState, LogId, LogSource, ObjectKey,
        ObjectStore, OffloadRunner, RetentionPolicy, RunSummary, SourceLayout, TransferEngine,
        TransferStateRepository,
    };
}
