//! Two-level job/build traversal of a [`LogSource`].

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{domain::models::LogRecord, ports::source::LogSource};

/// Where build logs live below each job directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    /// Intermediate directory between a job and its builds, e.g. `builds`
    pub builds_dir: Option<String>,
    /// Accepted log file names inside a build directory, in preference order
    pub log_file_names: Vec<String>,
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            builds_dir: None,
            log_file_names: vec!["log".to_string()],
        }
    }
}

impl SourceLayout {
    /// Layout of a Jenkins home `jobs` directory: `{job}/builds/{build}/log`
    pub fn jenkins() -> Self {
        Self {
            builds_dir: Some("builds".to_string()),
            ..Self::default()
        }
    }

    fn builds_path(&self, job: &str) -> PathBuf {
        match &self.builds_dir {
            Some(dir) => Path::new(job).join(dir),
            None => PathBuf::from(job),
        }
    }
}

fn list(source: &dyn LogSource, dir: &Path) -> Vec<String> {
    match source.subdirectories(dir) {
        Ok(names) => names,
        Err(e) => {
            warn!(
                root = %source.root().display(),
                dir = %dir.display(),
                error = %e,
                "cannot list directory, skipping"
            );
            Vec::new()
        }
    }
}

/// Lazily enumerate the eligible build logs of `source`.
///
/// A build is eligible when its directory holds one of the layout's log
/// files. Builds without one are skipped silently. Order is unspecified.
pub fn walk_logs<'a>(
    source: &'a dyn LogSource,
    layout: &'a SourceLayout,
) -> impl Iterator<Item = LogRecord> + 'a {
    list(source, Path::new("")).into_iter().flat_map(move |job| {
        let builds_path = layout.builds_path(&job);
        list(source, &builds_path)
            .into_iter()
            .filter_map(move |build| {
                let build_dir = builds_path.join(&build);
                let found = layout.log_file_names.iter().find_map(|name| {
                    let path = build_dir.join(name);
                    source.file_modified(&path).map(|modified| (path, modified))
                });

                match found {
                    Some((path, modified)) => Some(LogRecord {
                        job_name: job.clone(),
                        build_number: build,
                        path,
                        modified,
                    }),
                    None => {
                        debug!(job = %job, build = %build, "no log file in build directory");
                        None
                    }
                }
            })
    })
}
