use async_trait::async_trait;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::ports::source::LogSource;

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File { content: Bytes, modified: SystemTime },
    Symlink,
}

/// Fabricated build tree for tests
#[derive(Debug, Clone)]
pub struct InMemoryLogSource {
    root: PathBuf,
    available: bool,
    nodes: BTreeMap<PathBuf, Node>,
}

impl Default for InMemoryLogSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLogSource {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("memory://jobs"),
            available: true,
            nodes: BTreeMap::new(),
        }
    }

    /// A source whose root does not exist
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Add a directory (and its parents)
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.insert_dir(path.as_ref());
        self
    }

    /// Add a file (and its parent directories)
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<Bytes>) -> Self {
        self.add_file(path, content);
        self
    }

    /// Add a symlink entry; it is never treated as a directory or file
    pub fn with_symlink(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.insert_dir(parent);
        }
        self.nodes.insert(path.to_path_buf(), Node::Symlink);
        self
    }

    /// Mutable variant of [`with_file`](Self::with_file), for growing a tree between runs
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<Bytes>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.insert_dir(parent);
        }
        self.nodes.insert(
            path.to_path_buf(),
            Node::File {
                content: content.into(),
                modified: SystemTime::now(),
            },
        );
    }

    fn insert_dir(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.nodes.insert(ancestor.to_path_buf(), Node::Dir);
        }
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} not found", path.display()),
        )
    }
}

#[async_trait]
impl LogSource for InMemoryLogSource {
    fn root(&self) -> &Path {
        &self.root
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn subdirectories(&self, dir: &Path) -> io::Result<Vec<String>> {
        let is_root = dir.as_os_str().is_empty();
        if !self.available || (!is_root && !matches!(self.nodes.get(dir), Some(Node::Dir))) {
            return Err(Self::not_found(dir));
        }

        Ok(self
            .nodes
            .iter()
            .filter(|(path, node)| matches!(node, Node::Dir) && path.parent() == Some(dir))
            .filter_map(|(path, _)| path.file_name()?.to_str().map(str::to_string))
            .collect())
    }

    fn file_modified(&self, path: &Path) -> Option<SystemTime> {
        match self.nodes.get(path) {
            Some(Node::File { modified, .. }) => Some(*modified),
            _ => None,
        }
    }

    async fn read_log(&self, path: &Path) -> io::Result<Bytes> {
        match self.nodes.get(path) {
            Some(Node::File { content, .. }) => Ok(content.clone()),
            _ => Err(Self::not_found(path)),
        }
    }
}
