use async_trait::async_trait;
use object_store::memory::InMemory;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    adapters::outbound::{
        notify::{NoopNotifier, NotificationTarget},
        persistence::{
            FileTransferState, InMemoryLifecycleRepository, InMemoryTransferState,
            SqliteTransferState,
        },
        source::FsLogSource,
        storage::{
            create_s3_client, create_s3_store, ApacheObjectStoreAdapter, S3Config,
            S3LifecycleClient,
        },
    },
    domain::{
        errors::{StateResult, StorageError},
        models::RetentionPolicy,
        value_objects::BucketName,
    },
    ports::{
        notification::Notifier,
        repositories::{LifecycleRepository, TransferStateOpener, TransferStateRepository},
        source::LogSource,
        storage::ObjectStore,
    },
    services::{
        notify_fatal, LifecycleProvisioner, OffloadRunner, PreconditionError, SourceLayout,
    },
};

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source_dir: PathBuf,
    pub layout: SourceLayout,
    pub bucket: BucketName,
    pub key_prefix: Option<String>,
    pub storage_backend: StorageBackend,
    pub state_backend: StateBackend,
    pub notify: Option<NotificationTarget>,
    pub retention: RetentionPolicy,
    pub provision_lifecycle: bool,
}

impl AppConfig {
    /// In-memory storage and state with the default layout and retention policy
    pub fn new(source_dir: impl Into<PathBuf>, bucket: BucketName) -> Self {
        Self {
            source_dir: source_dir.into(),
            layout: SourceLayout::default(),
            bucket,
            key_prefix: None,
            storage_backend: StorageBackend::InMemory,
            state_backend: StateBackend::InMemory,
            notify: None,
            retention: RetentionPolicy::default(),
            provision_lifecycle: true,
        }
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    S3(S3Config),
}

/// Where the transfer state is persisted
#[derive(Debug, Clone)]
pub enum StateBackend {
    InMemory,
    /// Line file, one identifier per line
    File { path: PathBuf },
    Sqlite { path: PathBuf },
}

#[async_trait]
impl TransferStateOpener for StateBackend {
    async fn open(&self) -> StateResult<Arc<dyn TransferStateRepository>> {
        let state: Arc<dyn TransferStateRepository> = match self {
            Self::InMemory => Arc::new(InMemoryTransferState::new()),
            Self::File { path } => Arc::new(FileTransferState::open(path).await?),
            Self::Sqlite { path } => Arc::new(SqliteTransferState::open(path).await?),
        };

        Ok(state)
    }
}

/// Application dependencies container
pub struct AppDependencies {
    pub source: Arc<dyn LogSource>,
    pub object_store: Arc<dyn ObjectStore>,
    pub lifecycle_repository: Arc<dyn LifecycleRepository>,
    /// Opened by the runner after the source and storage checks pass
    pub transfer_state: Arc<dyn TransferStateOpener>,
    pub notifier: Arc<dyn Notifier>,
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
}

impl AppBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    /// Configure transfer state backend
    pub fn with_state_backend(mut self, backend: StateBackend) -> Self {
        self.config.state_backend = backend;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Build the application dependencies.
    ///
    /// Nothing is opened or created on disk here. A storage client that
    /// cannot be configured is a storage precondition failure and is
    /// reported through the notifier.
    pub async fn build_dependencies(&self) -> Result<AppDependencies, AppError> {
        let notifier = self.create_notifier();

        let (object_store, lifecycle_repository) = match self.create_storage_adapters().await {
            Ok(adapters) => adapters,
            Err(AppError::Precondition(e)) => {
                notify_fatal(notifier.as_ref(), &e).await;
                return Err(e.into());
            }
            Err(e) => return Err(e),
        };

        Ok(AppDependencies {
            source: Arc::new(FsLogSource::new(&self.config.source_dir)),
            object_store,
            lifecycle_repository,
            transfer_state: Arc::new(self.config.state_backend.clone()),
            notifier,
        })
    }

    /// Build the runner with all components wired together
    pub async fn build(self) -> Result<OffloadRunner, AppError> {
        let deps = self.build_dependencies().await?;
        Ok(self.assemble(deps))
    }

    /// Wire already-built dependencies into a runner
    pub fn assemble(self, deps: AppDependencies) -> OffloadRunner {
        let AppConfig {
            layout,
            bucket,
            key_prefix,
            retention,
            provision_lifecycle,
            ..
        } = self.config;

        let provisioner = provision_lifecycle
            .then(|| LifecycleProvisioner::new(deps.lifecycle_repository, bucket, retention));

        OffloadRunner::builder()
            .source(deps.source)
            .store(deps.object_store)
            .state(deps.transfer_state)
            .notifier(deps.notifier)
            .maybe_provisioner(provisioner)
            .layout(layout)
            .maybe_key_prefix(key_prefix)
            .build()
    }

    fn create_notifier(&self) -> Arc<dyn Notifier> {
        match self.config.notify.clone() {
            Some(target) => target.into_notifier(),
            None => Arc::new(NoopNotifier),
        }
    }

    /// Create storage adapters based on configuration
    async fn create_storage_adapters(
        &self,
    ) -> Result<(Arc<dyn ObjectStore>, Arc<dyn LifecycleRepository>), AppError> {
        match &self.config.storage_backend {
            StorageBackend::InMemory => {
                let store: Arc<dyn ObjectStore> =
                    Arc::new(ApacheObjectStoreAdapter::new(Arc::new(InMemory::new())));
                let lifecycle: Arc<dyn LifecycleRepository> =
                    Arc::new(InMemoryLifecycleRepository::new());
                Ok((store, lifecycle))
            }
            StorageBackend::S3(s3) => {
                if s3.bucket != self.config.bucket.as_str() {
                    return Err(AppError::Configuration {
                        message: format!(
                            "S3 bucket '{}' does not match destination bucket '{}'",
                            s3.bucket, self.config.bucket
                        ),
                    });
                }

                let store = create_s3_store(s3).map_err(|e| {
                    PreconditionError::StorageUnavailable(StorageError::InfrastructureError {
                        message: "failed to configure S3 client".to_string(),
                        source_message: Some(e.to_string()),
                    })
                })?;

                let lifecycle: Arc<dyn LifecycleRepository> =
                    Arc::new(S3LifecycleClient::new(create_s3_client(s3).await));

                let store: Arc<dyn ObjectStore> = Arc::new(ApacheObjectStoreAdapter::new(store));
                Ok((store, lifecycle))
            }
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error(transparent)]
    Precondition(#[from] PreconditionError),
}

impl AppError {
    /// Process exit status reported for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration { .. } => 1,
            Self::Precondition(e) => e.exit_code(),
        }
    }
}
