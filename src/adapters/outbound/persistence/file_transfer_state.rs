use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{
    domain::{
        errors::{StateError, StateResult},
        value_objects::LogId,
    },
    ports::repositories::TransferStateRepository,
};

/// Transfer state kept as a text file with one identifier per line.
///
/// The file is read in full when opened and only ever appended to. Each
/// append is flushed to disk before `record` returns.
pub struct FileTransferState {
    path: PathBuf,
    inner: Mutex<FileState>,
}

struct FileState {
    file: File,
    entries: HashSet<LogId>,
}

/// Entries found in the file plus the length of its newline-terminated part
struct ParsedState {
    entries: HashSet<LogId>,
    complete_len: usize,
    rejected: usize,
}

fn parse_state(bytes: &[u8]) -> ParsedState {
    // Anything after the final newline is a torn append that never completed
    let complete_len = bytes
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |idx| idx + 1);

    let mut entries = HashSet::new();
    let mut rejected = 0;

    // `lines` strips the `\r` of CRLF endings; anything else is part of the identifier
    for line in String::from_utf8_lossy(&bytes[..complete_len]).lines() {
        if line.is_empty() {
            continue;
        }
        match LogId::parse(line) {
            Ok(id) => {
                entries.insert(id);
            }
            Err(e) => {
                debug!(line, error = %e, "ignoring unrecognized transfer state line");
                rejected += 1;
            }
        }
    }

    ParsedState {
        entries,
        complete_len,
        rejected,
    }
}

impl FileTransferState {
    /// Open (creating if needed) the state file at `path`
    pub async fn open(path: impl Into<PathBuf>) -> StateResult<Self> {
        let path = path.into();
        let open_error = |source| StateError::Open {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(open_error)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .await
            .map_err(open_error)?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).await.map_err(open_error)?;

        let parsed = parse_state(&bytes);

        if parsed.complete_len < bytes.len() {
            warn!(
                path = %path.display(),
                discarded_bytes = bytes.len() - parsed.complete_len,
                "discarding unterminated last line of transfer state"
            );
            file.set_len(parsed.complete_len as u64)
                .await
                .map_err(open_error)?;
        }

        if parsed.rejected > 0 {
            warn!(
                path = %path.display(),
                rejected = parsed.rejected,
                "transfer state contains lines that are not log identifiers"
            );
        }

        debug!(
            path = %path.display(),
            entries = parsed.entries.len(),
            "loaded transfer state"
        );

        Ok(Self {
            path,
            inner: Mutex::new(FileState {
                file,
                entries: parsed.entries,
            }),
        })
    }
}

#[async_trait]
impl TransferStateRepository for FileTransferState {
    async fn contains(&self, id: &LogId) -> StateResult<bool> {
        Ok(self.inner.lock().await.entries.contains(id))
    }

    async fn record(&self, id: &LogId) -> StateResult<()> {
        let mut state = self.inner.lock().await;
        if state.entries.contains(id) {
            return Ok(());
        }

        let append_error = |source| StateError::Append {
            path: self.path.clone(),
            source,
        };

        let line = format!("{}\n", id);
        state
            .file
            .write_all(line.as_bytes())
            .await
            .map_err(append_error)?;
        state.file.flush().await.map_err(append_error)?;
        state.file.sync_data().await.map_err(append_error)?;

        state.entries.insert(id.clone());
        Ok(())
    }

    async fn len(&self) -> StateResult<usize> {
        Ok(self.inner.lock().await.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(job: &str, build: &str) -> LogId {
        LogId::new(job, build).unwrap()
    }

    #[tokio::test]
    async fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("uploaded.txt");

        {
            let state = FileTransferState::open(&path).await.unwrap();
            state.record(&id("build-api", "12")).await.unwrap();
            state.record(&id("deploy-web", "5")).await.unwrap();
            // Already present, not appended twice
            state.record(&id("build-api", "12")).await.unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "build-api-12\ndeploy-web-5\n");

        let state = FileTransferState::open(&path).await.unwrap();
        assert_eq!(state.len().await.unwrap(), 2);
        assert!(state.contains(&id("build-api", "12")).await.unwrap());
        assert!(state.contains(&id("deploy-web", "5")).await.unwrap());
        assert!(!state.contains(&id("build-api", "13")).await.unwrap());
    }

    #[tokio::test]
    async fn test_reads_existing_line_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uploaded.txt");
        std::fs::write(&path, "build-api-12\r\n\ndeploy-web-5\nnot an id\n").unwrap();

        let state = FileTransferState::open(&path).await.unwrap();
        assert_eq!(state.len().await.unwrap(), 2);
        assert!(state.contains(&id("build-api", "12")).await.unwrap());
        assert!(state.contains(&id("deploy-web", "5")).await.unwrap());

        state.record(&id("build-api", "13")).await.unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("build-api-12\r\n\ndeploy-web-5\nnot an id\n"));
        assert!(content.ends_with("build-api-13\n"));
    }

    #[tokio::test]
    async fn test_torn_last_line_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uploaded.txt");
        // "build-api-1" is a prefix of an interrupted "build-api-13"
        std::fs::write(&path, "build-api-12\nbuild-api-1").unwrap();

        let state = FileTransferState::open(&path).await.unwrap();
        assert!(state.contains(&id("build-api", "12")).await.unwrap());
        assert!(!state.contains(&id("build-api", "1")).await.unwrap());

        state.record(&id("build-api", "13")).await.unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "build-api-12\nbuild-api-13\n");
    }

    #[tokio::test]
    async fn test_surrounding_whitespace_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uploaded.txt");
        let padded = id(" nightly", "7 ");

        {
            let state = FileTransferState::open(&path).await.unwrap();
            state.record(&padded).await.unwrap();
        }

        for _ in 0..2 {
            let state = FileTransferState::open(&path).await.unwrap();
            assert!(state.contains(&padded).await.unwrap());
            assert!(!state.contains(&id("nightly", "7")).await.unwrap());
            // Known entries are not appended again
            state.record(&padded).await.unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), " nightly-7 \n");
    }
}
