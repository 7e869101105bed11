use async_trait::async_trait;
use bytes::Bytes;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

use crate::ports::source::LogSource;

/// Log source backed by the CI server's data directory on local disk
#[derive(Debug, Clone)]
pub struct FsLogSource {
    root: PathBuf,
}

impl FsLogSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl LogSource for FsLogSource {
    fn root(&self) -> &Path {
        &self.root
    }

    fn is_available(&self) -> bool {
        self.root.is_dir()
    }

    fn subdirectories(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in WalkDir::new(self.root.join(dir))
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
        {
            let entry = entry.map_err(io::Error::from)?;
            // Symlinked directories report a symlink file type here
            if !entry.file_type().is_dir() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) => names.push(name.to_string()),
                None => tracing::debug!(
                    path = %entry.path().display(),
                    "skipping directory with non UTF-8 name"
                ),
            }
        }

        names.sort();
        Ok(names)
    }

    fn file_modified(&self, path: &Path) -> Option<SystemTime> {
        let metadata = std::fs::symlink_metadata(self.root.join(path)).ok()?;
        if !metadata.is_file() {
            return None;
        }
        metadata.modified().ok()
    }

    async fn read_log(&self, path: &Path) -> io::Result<Bytes> {
        tokio::fs::read(self.root.join(path)).await.map(Bytes::from)
    }
}
