use async_trait::async_trait;
use bytes::Bytes;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Read-only view of the CI server's build directory tree.
///
/// All paths are relative to the source root.
#[async_trait]
pub trait LogSource: Send + Sync + 'static {
    /// Root location, used in log and error messages
    fn root(&self) -> &Path;

    /// Whether the root exists and is a directory
    fn is_available(&self) -> bool;

    /// Names of the true subdirectories of `dir`. Files and symlinks are not listed.
    fn subdirectories(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Modification time of `path` when it is a regular file
    fn file_modified(&self, path: &Path) -> Option<SystemTime>;

    /// Read the whole content of a log file
    async fn read_log(&self, path: &Path) -> io::Result<Bytes>;
}
