//! File Synchronizer - copy, skip, or ask for each template entry.
//!
//! Entries are handled strictly in input order. For each one the source and
//! destination hashes are computed concurrently, then the decision (and any
//! prompt) happens before the next entry is looked at.
//!
//! A directory entry is compared over the template's files only. Extra files
//! in the destination directory never take part, since copying leaves them
//! in place.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError, SplatConfig,
        ports::{EntryKind, Filesystem, Prompt, Reporter},
    },
    domain::{ContentHash, DirectoryDigest, SyncDecision, SyncEvent},
    error::SplatResult,
};

/// Copies template entries into the destination, entry by entry.
pub struct FileSynchronizer<'a> {
    filesystem: &'a dyn Filesystem,
    prompt: &'a dyn Prompt,
    reporter: &'a dyn Reporter,
}

impl<'a> FileSynchronizer<'a> {
    pub fn new(
        filesystem: &'a dyn Filesystem,
        prompt: &'a dyn Prompt,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            filesystem,
            prompt,
            reporter,
        }
    }

    /// Synchronize `entries` (template-relative names) and return how many
    /// were written.
    #[instrument(skip_all, fields(template = %config.template_name(), entries = entries.len()))]
    pub async fn sync(&self, config: &SplatConfig, entries: &[&str]) -> SplatResult<usize> {
        let mut copied = 0;

        for &name in entries {
            let source = config.template_path().join(name);
            let destination = config.output_dir().join(name);

            if self.sync_entry(name, &source, &destination).await? {
                copied += 1;
            }
        }

        info!(copied, "File sync finished");
        Ok(copied)
    }

    async fn sync_entry(&self, name: &str, source: &Path, destination: &Path) -> SplatResult<bool> {
        let files = match self.filesystem.entry_kind(source).await? {
            Some(EntryKind::Directory) => self.filesystem.files_below(source).await?,
            Some(EntryKind::File) => Vec::new(),
            None => return Err(vanished(source).into()),
        };

        let (source_hash, destination_hash) = tokio::join!(
            self.tree_hash(source, &files),
            self.tree_hash(destination, &files),
        );
        let source_hash = source_hash?.ok_or_else(|| vanished(source))?;
        let destination_hash = destination_hash?;

        let decision = SyncDecision::decide(&source_hash, destination_hash.as_ref());
        debug!(entry = name, ?decision, source = %source_hash, "Sync decision");

        let write = match decision {
            SyncDecision::Copy => true,
            SyncDecision::Skip => {
                self.reporter.report(&SyncEvent::Unchanged { name: name.into() });
                false
            }
            SyncDecision::Confirm => {
                let accepted = self.prompt.confirm(&overwrite_question(name), false)?;
                if !accepted {
                    self.reporter.report(&SyncEvent::Declined { name: name.into() });
                }
                accepted
            }
        };

        if !write {
            return Ok(false);
        }

        self.filesystem.copy(source, destination).await?;
        self.reporter.report(&SyncEvent::Copied { name: name.into() });
        Ok(true)
    }

    /// Hash whatever sits at `root`. A file hashes as itself. A directory
    /// hashes as the digest of `files` beneath it, with absent ones recorded
    /// as missing.
    async fn tree_hash(&self, root: &Path, files: &[String]) -> SplatResult<Option<ContentHash>> {
        match self.filesystem.entry_kind(root).await? {
            None => Ok(None),
            Some(EntryKind::File) => self.filesystem.content_hash(root).await,
            Some(EntryKind::Directory) => {
                let mut digest = DirectoryDigest::new();
                for relative in files {
                    match self.filesystem.content_hash(&root.join(relative)).await? {
                        Some(hash) => digest.add(relative.as_str(), hash),
                        None => digest.add_missing(relative.as_str()),
                    }
                }
                Ok(Some(digest.finish()))
            }
        }
    }
}

fn vanished(source: &Path) -> ApplicationError {
    ApplicationError::FilesystemError {
        path: source.to_path_buf(),
        reason: "template entry disappeared while splatting".into(),
    }
}

fn overwrite_question(name: &str) -> String {
    format!("File \"{name}\" already exists - replace?")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_names_the_file() {
        assert_eq!(
            overwrite_question(".eslintrc"),
            "File \".eslintrc\" already exists - replace?"
        );
    }
}
