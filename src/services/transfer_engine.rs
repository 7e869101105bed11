use bon::Builder;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        models::{FailedTransfer, LogRecord, RunSummary},
        value_objects::{LogId, ObjectKey},
    },
    ports::{
        notification::{Notification, Notifier},
        repositories::TransferStateRepository,
        source::LogSource,
        storage::ObjectStore,
    },
    services::log_walker::{walk_logs, SourceLayout},
};

/// Content type attached to uploaded logs
pub const LOG_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Uploads every log not yet recorded in the transfer state.
///
/// Logs are processed one at a time. An identifier is recorded only after
/// its upload has been confirmed, so a crash can at worst cause a repeat
/// upload to the same key on the next run, never a lost log.
#[derive(Builder)]
pub struct TransferEngine {
    source: Arc<dyn LogSource>,
    store: Arc<dyn ObjectStore>,
    state: Arc<dyn TransferStateRepository>,
    notifier: Option<Arc<dyn Notifier>>,
    #[builder(default)]
    layout: SourceLayout,
    #[builder(into)]
    key_prefix: Option<String>,
}

impl TransferEngine {
    /// Walk the source once and transfer every unseen log
    pub async fn run(&self) -> RunSummary {
        let mut summary = RunSummary::default();

        for record in walk_logs(self.source.as_ref(), &self.layout) {
            self.transfer(record, &mut summary).await;
        }

        summary
    }

    async fn transfer(&self, record: LogRecord, summary: &mut RunSummary) {
        let id = match record.id() {
            Ok(id) => id,
            Err(e) => {
                self.fail(summary, &record, None, e.to_string(), false)
                    .await;
                return;
            }
        };

        match self.state.contains(&id).await {
            Ok(true) => {
                info!(%id, "already uploaded, skipping");
                summary.record_skipped();
                return;
            }
            Ok(false) => {}
            Err(e) => {
                let reason = format!("transfer state lookup failed: {}", e);
                self.fail(summary, &record, Some(id), reason, true).await;
                return;
            }
        }

        let key = match ObjectKey::for_log(
            self.key_prefix.as_deref(),
            &record.job_name,
            &record.build_number,
        ) {
            Ok(key) => key,
            Err(e) => {
                let reason = format!("no valid destination key: {}", e);
                self.fail(summary, &record, Some(id), reason, false).await;
                return;
            }
        };

        let data = match self.source.read_log(&record.path).await {
            Ok(data) => data,
            Err(e) => {
                let reason = format!("cannot read {}: {}", record.path.display(), e);
                self.fail(summary, &record, Some(id), reason, true).await;
                return;
            }
        };
        let size = data.len();

        if let Err(e) = self
            .store
            .put_object(&key, data, Some(LOG_CONTENT_TYPE))
            .await
        {
            let reason = format!("upload to {} failed: {}", key, e);
            self.fail(summary, &record, Some(id), reason, true).await;
            return;
        }

        // The object is confirmed written; record it before touching the next log
        if let Err(e) = self.state.record(&id).await {
            let reason = format!("uploaded to {} but not recorded: {}", key, e);
            self.fail(summary, &record, Some(id), reason, true).await;
            return;
        }

        info!(%id, %key, bytes = size, "uploaded");
        summary.record_uploaded();
    }

    async fn fail(
        &self,
        summary: &mut RunSummary,
        record: &LogRecord,
        id: Option<LogId>,
        reason: String,
        notify: bool,
    ) {
        warn!(
            job = %record.job_name,
            build = %record.build_number,
            reason = %reason,
            "log left for retry"
        );

        if notify {
            if let Some(notifier) = &self.notifier {
                let notification = Notification::error(
                    format!(
                        "log offload failed for {} #{}",
                        record.job_name, record.build_number
                    ),
                    reason.clone(),
                );
                if let Err(e) = notifier.notify(&notification).await {
                    warn!(error = %e, "failed to deliver notification");
                } else {
                    debug!(subject = %notification.subject, "notification sent");
                }
            }
        }

        summary.record_failed(FailedTransfer {
            id,
            job_name: record.job_name.clone(),
            build_number: record.build_number.clone(),
            reason,
        });
    }
}
