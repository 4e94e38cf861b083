//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use async_trait::async_trait;

use splat_core::{
    application::{
        ApplicationError,
        ports::{EntryKind, Filesystem},
    },
    domain::ContentHash,
    error::SplatResult,
};

/// In-memory filesystem for testing.
///
/// Cloning shares the same underlying tree, so a test can hand one clone to
/// a service and inspect another afterwards.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
    /// Paths whose reads fail with a non-"not found" error.
    broken: HashSet<PathBuf>,
    /// Paths whose writes fail.
    read_only: HashSet<PathBuf>,
    /// Every path written, in order.
    writes: Vec<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_parents(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        if let Some(parent) = path.parent() {
            for component in parent.components() {
                current.push(component);
                self.directories.insert(current.clone());
            }
        }
    }

    fn kind(&self, path: &Path) -> Option<EntryKind> {
        if self.files.contains_key(path) {
            Some(EntryKind::File)
        } else if self.directories.contains(path) {
            Some(EntryKind::Directory)
        } else {
            None
        }
    }

    fn check_readable(&self, path: &Path) -> SplatResult<()> {
        if self.broken.iter().any(|broken| path.starts_with(broken)) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Failed to read file: permission denied".into(),
            }
            .into());
        }
        Ok(())
    }

    fn check_writable(&self, path: &Path) -> SplatResult<()> {
        if self.read_only.iter().any(|locked| path.starts_with(locked)) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Failed to write file: read-only".into(),
            }
            .into());
        }
        Ok(())
    }

    /// Files strictly below `root` as `(relative, absolute)`.
    fn files_under(&self, root: &Path) -> Vec<(PathBuf, PathBuf)> {
        self.files
            .keys()
            .filter_map(|p| {
                p.strip_prefix(root)
                    .ok()
                    .filter(|rel| !rel.as_os_str().is_empty())
                    .map(|rel| (rel.to_path_buf(), p.clone()))
            })
            .collect()
    }

    fn put_file(&mut self, path: &Path, contents: Vec<u8>) {
        self.add_parents(path);
        self.files.insert(path.to_path_buf(), contents);
        self.writes.push(path.to_path_buf());
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file (and its parent directories) without recording a write.
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Self {
        self.add_file(path, contents);
        self
    }

    /// Seed an empty directory.
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        {
            let mut inner = self.inner.write().unwrap();
            let path = path.as_ref();
            inner.add_parents(path);
            inner.directories.insert(path.to_path_buf());
        }
        self
    }

    /// Seed a file without recording a write.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) {
        let mut inner = self.inner.write().unwrap();
        let path = path.as_ref();
        inner.add_parents(path);
        inner
            .files
            .insert(path.to_path_buf(), contents.as_ref().to_vec());
    }

    /// Make every read at or below `path` fail with an I/O error.
    pub fn break_path(&self, path: impl AsRef<Path>) {
        let mut inner = self.inner.write().unwrap();
        inner.broken.insert(path.as_ref().to_path_buf());
    }

    /// Make every write at or below `path` fail. Reads still succeed.
    pub fn make_read_only(&self, path: impl AsRef<Path>) {
        let mut inner = self.inner.write().unwrap();
        inner.read_only.insert(path.as_ref().to_path_buf());
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// Read a file's content as UTF-8 (testing helper).
    pub fn read_string(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read_file(path)
            .and_then(|bytes| String::from_utf8(bytes).ok())
    }

    /// Paths written through the `Filesystem` port, in order.
    pub fn writes(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        inner.writes.clone()
    }

    /// Every file path in the tree (testing helper).
    pub fn all_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        inner.files.keys().cloned().collect()
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_error() -> splat_core::error::SplatError {
    splat_core::error::SplatError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

#[async_trait]
impl Filesystem for MemoryFilesystem {
    async fn entry_kind(&self, path: &Path) -> SplatResult<Option<EntryKind>> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        inner.check_readable(path)?;
        Ok(inner.kind(path))
    }

    async fn list_dir(&self, path: &Path) -> SplatResult<Vec<String>> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        inner.check_readable(path)?;

        if inner.kind(path) != Some(EntryKind::Directory) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Not a directory".into(),
            }
            .into());
        }

        let children: BTreeSet<String> = inner
            .files
            .keys()
            .chain(inner.directories.iter())
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();

        Ok(children.into_iter().collect())
    }

    async fn files_below(&self, root: &Path) -> SplatResult<Vec<String>> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        inner.check_readable(root)?;

        let mut files: Vec<String> = inner
            .files_under(root)
            .into_iter()
            .map(|(relative, _)| {
                relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .collect();
        files.sort();
        Ok(files)
    }

    async fn content_hash(&self, path: &Path) -> SplatResult<Option<ContentHash>> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        inner.check_readable(path)?;

        match inner.kind(path) {
            None => Ok(None),
            Some(EntryKind::File) => Ok(inner.files.get(path).map(|b| ContentHash::of_bytes(b))),
            Some(EntryKind::Directory) => Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Failed to hash: is a directory".into(),
            }
            .into()),
        }
    }

    async fn read_to_string(&self, path: &Path) -> SplatResult<String> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        inner.check_readable(path)?;

        let bytes = inner
            .files
            .get(path)
            .ok_or_else(|| ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Failed to read file: not found".into(),
            })?;

        String::from_utf8(bytes.clone()).map_err(|_| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Failed to read file: not valid UTF-8".into(),
            }
            .into()
        })
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> SplatResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        inner.check_writable(path)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.put_file(path, contents.to_vec());
        Ok(())
    }

    async fn copy(&self, from: &Path, to: &Path) -> SplatResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        inner.check_readable(from)?;
        inner.check_writable(to)?;

        match inner.kind(from) {
            Some(EntryKind::File) => {
                let bytes = inner.files[from].clone();
                inner.put_file(to, bytes);
            }
            Some(EntryKind::Directory) => {
                inner.directories.insert(to.to_path_buf());
                for (relative, absolute) in inner.files_under(from) {
                    let bytes = inner.files[&absolute].clone();
                    inner.put_file(&to.join(relative), bytes);
                }
            }
            None => {
                return Err(ApplicationError::FilesystemError {
                    path: from.to_path_buf(),
                    reason: "Failed to copy: not found".into(),
                }
                .into());
            }
        }

        Ok(())
    }

    async fn create_dir_all(&self, path: &Path) -> SplatResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        inner.check_writable(path)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }
}
