//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `splat-adapters` crate provides the filesystems; the CLI provides the
//! prompt and reporter.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::{ContentHash, SyncEvent};
use crate::error::SplatResult;

/// What a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `splat_adapters::filesystem::LocalFilesystem` (production)
/// - `splat_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - A missing path is a value (`None`), never an error, for `entry_kind`
///   and `content_hash`. Every other failure is an error, including a stat
///   that fails for any reason other than "not found".
/// - Hashes are per file. Directory comparison is built on top of
///   `files_below` by the synchronizer.
#[async_trait]
pub trait Filesystem: Send + Sync {
    /// Stat a path. `None` when nothing exists there.
    async fn entry_kind(&self, path: &Path) -> SplatResult<Option<EntryKind>>;

    /// Names of the immediate children of a directory, sorted.
    async fn list_dir(&self, path: &Path) -> SplatResult<Vec<String>>;

    /// `/`-separated paths of every file below a directory, relative to it.
    async fn files_below(&self, root: &Path) -> SplatResult<Vec<String>>;

    /// Stream a file through the hasher. `None` when nothing exists at the
    /// path; a directory there is an error.
    async fn content_hash(&self, path: &Path) -> SplatResult<Option<ContentHash>>;

    /// Read a whole file as UTF-8 text.
    async fn read_to_string(&self, path: &Path) -> SplatResult<String>;

    /// Create or truncate a file with the given bytes.
    async fn write_file(&self, path: &Path, contents: &[u8]) -> SplatResult<()>;

    /// Copy a file, or a directory tree, overwriting what is in the way.
    /// Files in the target that the source lacks are left alone.
    async fn copy(&self, from: &Path, to: &Path) -> SplatResult<()>;

    /// Create a directory and all parent directories.
    async fn create_dir_all(&self, path: &Path) -> SplatResult<()>;
}

/// Port for yes/no questions.
///
/// Calls block until answered; only one question is ever outstanding.
pub trait Prompt: Send + Sync {
    /// Ask `message`, returning `default` when the user just presses enter.
    fn confirm(&self, message: &str, default: bool) -> SplatResult<bool>;
}

/// Port for human-readable progress.
pub trait Reporter: Send + Sync {
    fn report(&self, event: &SyncEvent);
}
