use bon::Builder;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    domain::models::RunSummary,
    ports::{
        notification::{Notification, Notifier},
        repositories::TransferStateOpener,
        source::LogSource,
        storage::ObjectStore,
    },
    services::{
        lifecycle_provisioner::{LifecycleProvisioner, ProvisionOutcome},
        log_walker::SourceLayout,
        precondition_checker::{PreconditionChecker, PreconditionError},
        transfer_engine::TransferEngine,
    },
};

/// Result of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// `None` when provisioning is disabled
    pub lifecycle: Option<ProvisionOutcome>,
    pub summary: RunSummary,
}

/// Checker, then provisioner, then transfer engine
#[derive(Builder)]
pub struct OffloadRunner {
    source: Arc<dyn LogSource>,
    store: Arc<dyn ObjectStore>,
    state: Arc<dyn TransferStateOpener>,
    notifier: Arc<dyn Notifier>,
    provisioner: Option<LifecycleProvisioner>,
    #[builder(default)]
    layout: SourceLayout,
    #[builder(into)]
    key_prefix: Option<String>,
}

impl OffloadRunner {
    /// Execute one offload run.
    ///
    /// Only a failed precondition is an error. Lifecycle and per-log
    /// failures are reported through the log stream and the summary.
    pub async fn run(&self) -> Result<RunReport, PreconditionError> {
        let checker =
            PreconditionChecker::new(self.source.clone(), self.store.clone(), self.state.clone());

        let state = match checker.check().await {
            Ok(state) => state,
            Err(e) => {
                notify_fatal(self.notifier.as_ref(), &e).await;
                return Err(e);
            }
        };

        let lifecycle = match &self.provisioner {
            Some(provisioner) => Some(provisioner.provision().await),
            None => {
                info!("lifecycle provisioning disabled");
                None
            }
        };

        let summary = TransferEngine::builder()
            .source(self.source.clone())
            .store(self.store.clone())
            .state(state)
            .notifier(self.notifier.clone())
            .layout(self.layout.clone())
            .maybe_key_prefix(self.key_prefix.clone())
            .build()
            .run()
            .await;

        info!(
            uploaded = summary.uploaded,
            skipped = summary.skipped,
            failed = summary.failed,
            "run complete: {}",
            summary
        );

        Ok(RunReport { lifecycle, summary })
    }
}

/// Report a failure that aborts the run before any work was done
pub async fn notify_fatal(notifier: &dyn Notifier, error: &PreconditionError) {
    let notification = Notification::error("log offload aborted", error.to_string());
    match notifier.notify(&notification).await {
        Ok(()) => debug!(subject = %notification.subject, "notification sent"),
        Err(e) => warn!(error = %e, "failed to deliver notification"),
    }
}
