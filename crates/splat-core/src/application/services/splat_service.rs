//! Splat Service - main application orchestrator.
//!
//! This service coordinates one run:
//! 1. Validate the template path (missing vs. not a directory)
//! 2. List the template's entries
//! 3. Make sure the destination exists
//! 4. Synchronize every entry except the manifest
//! 5. Merge the manifest
//!
//! Nothing is rolled back on failure: entries written before an error stay.

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError, SplatConfig,
        ports::{EntryKind, Filesystem, Prompt, Reporter},
        services::{FileSynchronizer, ManifestMerger},
    },
    error::SplatResult,
};

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplatSummary {
    /// Entries copied by the file synchronizer.
    pub copied: usize,
    /// Whether the manifest was created or rewritten.
    pub manifest_changed: bool,
}

impl SplatSummary {
    pub fn changes(&self) -> usize {
        self.copied + usize::from(self.manifest_changed)
    }

    pub fn changed(&self) -> bool {
        self.changes() > 0
    }
}

/// Main splat service.
pub struct SplatService {
    filesystem: Box<dyn Filesystem>,
    prompt: Box<dyn Prompt>,
    reporter: Box<dyn Reporter>,
}

impl SplatService {
    /// Create a new splat service with the given adapters.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        prompt: Box<dyn Prompt>,
        reporter: Box<dyn Reporter>,
    ) -> Self {
        Self {
            filesystem,
            prompt,
            reporter,
        }
    }

    /// Apply the configured template to the configured destination.
    #[instrument(
        skip_all,
        fields(
            template = %config.template_name(),
            output_dir = %config.output_dir().display()
        )
    )]
    pub async fn run(&self, config: &SplatConfig) -> SplatResult<SplatSummary> {
        self.validate_template(config).await?;

        let mut entries = self.filesystem.list_dir(config.template_path()).await?;
        entries.sort();
        debug!(entries = entries.len(), "Template listed");

        match self.filesystem.entry_kind(config.output_dir()).await? {
            Some(EntryKind::Directory) => {}
            Some(EntryKind::File) => {
                return Err(ApplicationError::FilesystemError {
                    path: config.output_dir().to_path_buf(),
                    reason: "destination is not a directory".into(),
                }
                .into());
            }
            None => {
                info!("Creating destination directory");
                self.filesystem.create_dir_all(config.output_dir()).await?;
            }
        }

        let copyable = config.copyable_entries(&entries);
        let copied = FileSynchronizer::new(
            self.filesystem.as_ref(),
            self.prompt.as_ref(),
            self.reporter.as_ref(),
        )
        .sync(config, &copyable)
        .await?;

        let manifest_changes = ManifestMerger::new(self.filesystem.as_ref(), self.reporter.as_ref())
            .merge(config, &entries)
            .await?;

        let summary = SplatSummary {
            copied,
            manifest_changed: manifest_changes > 0,
        };
        info!(changes = summary.changes(), "Splat completed");
        Ok(summary)
    }

    /// Template must exist and be a directory. Runs before anything is written.
    async fn validate_template(&self, config: &SplatConfig) -> SplatResult<()> {
        let path = config.template_path();

        match self.filesystem.entry_kind(path).await? {
            Some(EntryKind::Directory) => Ok(()),
            Some(EntryKind::File) => Err(ApplicationError::TemplateNotADirectory {
                name: config.template_name().to_string(),
                path: path.to_path_buf(),
            }
            .into()),
            None => Err(ApplicationError::TemplateNotFound {
                name: config.template_name().to_string(),
                path: path.to_path_buf(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_manifest_as_one_change() {
        let summary = SplatSummary {
            copied: 2,
            manifest_changed: true,
        };
        assert_eq!(summary.changes(), 3);
        assert!(summary.changed());
    }

    #[test]
    fn empty_summary_is_unchanged() {
        assert!(!SplatSummary::default().changed());
    }
}
