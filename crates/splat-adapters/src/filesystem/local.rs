//! Local filesystem adapter using tokio::fs.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tracing::trace;
use walkdir::WalkDir;

use splat_core::{
    application::{
        ApplicationError,
        ports::{EntryKind, Filesystem},
    },
    domain::{ContentHash, ContentHasher},
    error::{SplatError, SplatResult},
};

/// Read buffer used while streaming a file through the hasher.
const HASH_CHUNK: usize = 64 * 1024;

/// Production filesystem implementation using `tokio::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Filesystem for LocalFilesystem {
    async fn entry_kind(&self, path: &Path) -> SplatResult<Option<EntryKind>> {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => Ok(Some(EntryKind::Directory)),
            Ok(_) => Ok(Some(EntryKind::File)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(path, e, "stat")),
        }
    }

    async fn list_dir(&self, path: &Path) -> SplatResult<Vec<String>> {
        let mut reader = tokio::fs::read_dir(path)
            .await
            .map_err(|e| map_io_error(path, e, "read directory"))?;

        let mut names = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| map_io_error(path, e, "read directory"))?
        {
            let name = entry.file_name().into_string().map_err(|raw| {
                ApplicationError::FilesystemError {
                    path: path.join(&raw),
                    reason: "File name is not valid UTF-8".into(),
                }
            })?;
            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    async fn files_below(&self, root: &Path) -> SplatResult<Vec<String>> {
        Ok(walk_files(root)?
            .into_iter()
            .map(|(relative, _)| relative)
            .collect())
    }

    async fn content_hash(&self, path: &Path) -> SplatResult<Option<ContentHash>> {
        match self.entry_kind(path).await? {
            None => Ok(None),
            Some(EntryKind::File) => hash_file(path).await,
            Some(EntryKind::Directory) => Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Failed to hash: is a directory".into(),
            }
            .into()),
        }
    }

    async fn read_to_string(&self, path: &Path) -> SplatResult<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| map_io_error(path, e, "read file"))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> SplatResult<()> {
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| map_io_error(path, e, "write file"))
    }

    async fn copy(&self, from: &Path, to: &Path) -> SplatResult<()> {
        match self.entry_kind(from).await? {
            Some(EntryKind::Directory) => copy_tree(from, to).await,
            Some(EntryKind::File) => copy_file(from, to).await,
            None => Err(map_io_error(
                from,
                io::Error::from(io::ErrorKind::NotFound),
                "copy",
            )),
        }
    }

    async fn create_dir_all(&self, path: &Path) -> SplatResult<()> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| map_io_error(path, e, "create directory"))
    }
}

/// Stream one file through the hasher. A file that vanished is `None`.
async fn hash_file(path: &Path) -> SplatResult<Option<ContentHash>> {
    let mut file = match tokio::fs::File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(map_io_error(path, e, "open file")),
    };

    let mut hasher = ContentHasher::new();
    let mut buf = vec![0u8; HASH_CHUNK];
    loop {
        let read = file
            .read(&mut buf)
            .await
            .map_err(|e| map_io_error(path, e, "read file"))?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }

    let hash = hasher.finish();
    trace!(path = %path.display(), %hash, "Hashed file");
    Ok(Some(hash))
}

async fn copy_file(from: &Path, to: &Path) -> SplatResult<()> {
    tokio::fs::copy(from, to)
        .await
        .map(|_| ())
        .map_err(|e| map_io_error(to, e, "copy file"))
}

/// Recreate `from` under `to`. Files already at `to` that are not in `from`
/// are left alone.
async fn copy_tree(from: &Path, to: &Path) -> SplatResult<()> {
    tokio::fs::create_dir_all(to)
        .await
        .map_err(|e| map_io_error(to, e, "create directory"))?;

    for entry in WalkDir::new(from).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(from, e))?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| SplatError::Internal {
                message: format!("walked outside {}: {e}", from.display()),
            })?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            tokio::fs::create_dir_all(&target)
                .await
                .map_err(|e| map_io_error(&target, e, "create directory"))?;
        } else {
            copy_file(entry.path(), &target).await?;
        }
    }

    Ok(())
}

/// Files (not directories) below `root` as `(relative, absolute)` pairs.
fn walk_files(root: &Path) -> SplatResult<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        if entry.file_type().is_dir() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| SplatError::Internal {
                message: format!("walked outside {}: {e}", root.display()),
            })?
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        files.push((relative, entry.into_path()));
    }

    Ok(files)
}

fn walk_error(root: &Path, e: walkdir::Error) -> SplatError {
    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
    ApplicationError::FilesystemError {
        path,
        reason: format!("Failed to walk directory: {e}"),
    }
    .into()
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SplatError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_path_has_no_hash() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();

        assert_eq!(fs.content_hash(&dir.path().join("nope")).await.unwrap(), None);
        assert_eq!(fs.entry_kind(&dir.path().join("nope")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_hash_matches_in_memory_hash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.txt");
        std::fs::write(&path, "hello world").unwrap();

        let hash = LocalFilesystem::new().content_hash(&path).await.unwrap();
        assert_eq!(hash, Some(ContentHash::of_bytes(b"hello world")));
    }

    #[tokio::test]
    async fn files_below_are_relative_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src/nested")).unwrap();
        std::fs::write(dir.path().join("src/nested/z.js"), "z").unwrap();
        std::fs::write(dir.path().join("src/a.js"), "a").unwrap();

        let files = LocalFilesystem::new()
            .files_below(&dir.path().join("src"))
            .await
            .unwrap();
        assert_eq!(files, ["a.js", "nested/z.js"]);
    }

    #[tokio::test]
    async fn directory_has_no_content_hash() {
        let dir = tempfile::tempdir().unwrap();

        let err = LocalFilesystem::new().content_hash(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("is a directory"));
    }

    #[tokio::test]
    async fn list_dir_is_sorted_and_shallow() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        std::fs::create_dir_all(dir.path().join("src/deep")).unwrap();

        let names = LocalFilesystem::new().list_dir(dir.path()).await.unwrap();
        assert_eq!(names, ["a.txt", "b.txt", "src"]);
    }

    #[tokio::test]
    async fn copy_tree_keeps_extra_destination_files() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("from");
        let to = dir.path().join("to");
        std::fs::create_dir_all(from.join("inner")).unwrap();
        std::fs::write(from.join("inner/new.txt"), "new").unwrap();
        std::fs::create_dir_all(&to).unwrap();
        std::fs::write(to.join("keep.txt"), "keep").unwrap();

        LocalFilesystem::new().copy(&from, &to).await.unwrap();

        assert_eq!(std::fs::read_to_string(to.join("inner/new.txt")).unwrap(), "new");
        assert_eq!(std::fs::read_to_string(to.join("keep.txt")).unwrap(), "keep");
    }

    #[tokio::test]
    async fn copy_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("from.txt");
        let to = dir.path().join("to.txt");
        std::fs::write(&from, "template").unwrap();
        std::fs::write(&to, "a much longer destination body").unwrap();

        LocalFilesystem::new().copy(&from, &to).await.unwrap();
        assert_eq!(std::fs::read(&to).unwrap(), b"template");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreadable_file_is_an_error_not_absent() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locked.txt");
        std::fs::write(&path, "secret").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores permission bits; nothing to assert there.
        if std::fs::read(&path).is_ok() {
            return;
        }

        let err = LocalFilesystem::new().content_hash(&path).await.unwrap_err();
        assert!(matches!(
            err,
            SplatError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failed_stat_is_an_error_not_absent() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        std::fs::write(locked.join("package.json"), "{}").unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        let denied = std::fs::metadata(locked.join("package.json")).is_err();
        let result = LocalFilesystem::new()
            .entry_kind(&locked.join("package.json"))
            .await;
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

        // Root ignores permission bits; nothing to assert there.
        if !denied {
            return;
        }
        assert!(result.is_err());
    }
}
