use anyhow::{Context, Result};
use ci_log_offload::{
    adapters::outbound::{notify::NotificationTarget, storage::S3Config},
    app::{AppBuilder, AppConfig, StateBackend, StorageBackend},
    domain::{models::StorageClass, value_objects::BucketName},
    services::SourceLayout,
    RetentionPolicy,
};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "log-offload")]
#[command(about = "Upload completed CI build logs to object storage", long_about = None)]
struct Cli {
    /// Directory holding one subdirectory per job
    #[arg(long, env = "LOG_OFFLOAD_SOURCE_DIR")]
    source_dir: PathBuf,

    /// Directory between a job and its builds (`builds` for a Jenkins home)
    #[arg(long, env = "LOG_OFFLOAD_BUILDS_DIR")]
    builds_dir: Option<String>,

    /// Log file name inside a build directory; repeat to accept several
    #[arg(
        long = "log-file-name",
        env = "LOG_OFFLOAD_LOG_FILE_NAMES",
        value_delimiter = ',',
        default_value = "log"
    )]
    log_file_names: Vec<String>,

    /// Destination bucket
    #[arg(long, env = "LOG_OFFLOAD_BUCKET")]
    bucket: String,

    /// Key prefix prepended to `{job}/{build}.log`
    #[arg(long, env = "LOG_OFFLOAD_KEY_PREFIX")]
    key_prefix: Option<String>,

    /// Storage backend type
    #[arg(long, env = "LOG_OFFLOAD_STORAGE_BACKEND", default_value = "s3")]
    storage_backend: String,

    /// S3 region
    #[arg(long, env = "LOG_OFFLOAD_S3_REGION", default_value = "us-east-1")]
    s3_region: String,

    /// S3 endpoint URL, for S3-compatible services
    #[arg(long, env = "LOG_OFFLOAD_S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// S3 access key
    #[arg(long, env = "LOG_OFFLOAD_S3_ACCESS_KEY")]
    s3_access_key: Option<String>,

    /// S3 secret key
    #[arg(long, env = "LOG_OFFLOAD_S3_SECRET_KEY", hide_env_values = true)]
    s3_secret_key: Option<String>,

    /// Allow plain HTTP endpoints
    #[arg(long, env = "LOG_OFFLOAD_ALLOW_HTTP", default_value = "false")]
    allow_http: bool,

    /// Transfer state backend type
    #[arg(long, env = "LOG_OFFLOAD_STATE_BACKEND", default_value = "file")]
    state_backend: String,

    /// Transfer state location
    #[arg(long, env = "LOG_OFFLOAD_STATE_PATH", default_value = "transferred-logs.txt")]
    state_path: PathBuf,

    /// Also append the run log to this file
    #[arg(long, env = "LOG_OFFLOAD_RUN_LOG")]
    run_log: Option<PathBuf>,

    /// Email address or webhook URL notified of failures
    #[arg(long, env = "LOG_OFFLOAD_NOTIFY")]
    notify: Option<String>,

    /// Days before logs move to the cold storage class
    #[arg(long, env = "LOG_OFFLOAD_TRANSITION_DAYS", default_value = "30")]
    transition_days: u32,

    /// Days before logs are deleted
    #[arg(long, env = "LOG_OFFLOAD_EXPIRATION_DAYS", default_value = "365")]
    expiration_days: u32,

    /// Cold storage class
    #[arg(long, env = "LOG_OFFLOAD_STORAGE_CLASS", default_value = "GLACIER")]
    storage_class: String,

    /// Do not query or install the bucket lifecycle policy
    #[arg(long, env = "LOG_OFFLOAD_SKIP_LIFECYCLE", default_value = "false")]
    skip_lifecycle: bool,

    /// Log level
    #[arg(long, env = "LOG_OFFLOAD_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let bucket = BucketName::new(self.bucket.as_str()).context("invalid --bucket")?;

        let storage_backend = match self.storage_backend.as_str() {
            "memory" => StorageBackend::InMemory,
            "s3" => StorageBackend::S3(S3Config {
                bucket: bucket.as_str().to_string(),
                region: self.s3_region.clone(),
                access_key: self.s3_access_key.clone(),
                secret_key: self.s3_secret_key.clone(),
                endpoint: self.s3_endpoint.clone(),
                allow_http: self.allow_http,
            }),
            _ => anyhow::bail!("Unknown storage backend: {}", self.storage_backend),
        };

        let state_backend = match self.state_backend.as_str() {
            "file" => StateBackend::File {
                path: self.state_path.clone(),
            },
            "sqlite" => StateBackend::Sqlite {
                path: self.state_path.clone(),
            },
            _ => anyhow::bail!("Unknown state backend: {}", self.state_backend),
        };

        let notify = self
            .notify
            .as_deref()
            .map(NotificationTarget::parse)
            .transpose()
            .context("invalid --notify")?;

        let retention = RetentionPolicy {
            transition_days: self.transition_days,
            expiration_days: self.expiration_days,
            storage_class: StorageClass::parse(&self.storage_class),
        };
        retention
            .validate()
            .context("invalid lifecycle policy settings")?;

        let log_file_names: Vec<String> = self
            .log_file_names
            .iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        if log_file_names.is_empty() {
            anyhow::bail!("at least one --log-file-name is required");
        }

        Ok(AppConfig {
            source_dir: self.source_dir.clone(),
            layout: SourceLayout {
                builds_dir: self.builds_dir.clone().filter(|dir| !dir.is_empty()),
                log_file_names,
            },
            bucket,
            key_prefix: self.key_prefix.clone(),
            storage_backend,
            state_backend,
            notify,
            retention,
            provision_lifecycle: !self.skip_lifecycle,
        })
    }

    fn init_logging(&self) -> Result<()> {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(self.log_level.to_lowercase()))
            .context("invalid --log-level")?;

        let file_layer = match &self.run_log {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("cannot open run log {}", path.display()))?;
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
            }
            None => None,
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .with(file_layer)
            .init();

        Ok(())
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.to_app_config()?;

    info!(
        source = %config.source_dir.display(),
        bucket = %config.bucket,
        storage_backend = %cli.storage_backend,
        state_backend = %cli.state_backend,
        "starting log offload"
    );

    let runner = match AppBuilder::new(config).build().await {
        Ok(runner) => runner,
        Err(e) => {
            error!(error = %e, "cannot start log offload");
            return Ok(ExitCode::from(e.exit_code()));
        }
    };

    match runner.run().await {
        // Per-log failures are reported in the summary, not the exit status
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => Ok(ExitCode::from(e.exit_code())),
    }
}

fn main() -> Result<ExitCode> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run(cli))
}
