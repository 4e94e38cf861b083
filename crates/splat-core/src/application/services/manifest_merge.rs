//! Manifest Merger - reconcile the template's dependency manifest with the
//! destination's instead of overwriting it.
//!
//! 1. Template has no manifest: nothing to do
//! 2. Destination has none: copy verbatim
//! 3. Both exist: merge dependency sections and write only if the
//!    serialized result differs from the destination as it stands

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError, SplatConfig,
        ports::{Filesystem, Reporter},
    },
    domain::{DomainError, Manifest, SyncEvent},
    error::{SplatError, SplatResult},
};

/// Merges the template manifest into the destination manifest.
pub struct ManifestMerger<'a> {
    filesystem: &'a dyn Filesystem,
    reporter: &'a dyn Reporter,
}

impl<'a> ManifestMerger<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, reporter: &'a dyn Reporter) -> Self {
        Self {
            filesystem,
            reporter,
        }
    }

    /// Returns 1 when the destination manifest was written, 0 otherwise.
    #[instrument(skip_all, fields(manifest = %config.manifest_name()))]
    pub async fn merge(&self, config: &SplatConfig, entries: &[String]) -> SplatResult<usize> {
        let name = config.manifest_name();
        if !entries.iter().any(|entry| entry == name) {
            debug!("Template has no manifest");
            return Ok(0);
        }

        let source = config.template_path().join(name);
        let destination = config.output_dir().join(name);

        if self.filesystem.entry_kind(&destination).await?.is_none() {
            self.filesystem.copy(&source, &destination).await?;
            info!(path = %destination.display(), "Manifest copied from template");
            self.reporter.report(&SyncEvent::ManifestCreated { name: name.into() });
            return Ok(1);
        }

        let (template, current) = tokio::join!(
            self.load(&source),
            self.load(&destination),
        );
        let (template, current) = (template?, current?);

        let merged = current
            .merge(&template, config.precedence())
            .map_err(|e| manifest_error(&destination, e))?;

        let rendered = merged.to_pretty_string();
        if rendered == current.to_pretty_string() {
            debug!("Merged manifest is identical, not writing");
            self.reporter.report(&SyncEvent::ManifestUnchanged { name: name.into() });
            return Ok(0);
        }

        let mut contents = rendered.into_bytes();
        contents.push(b'\n');
        self.filesystem.write_file(&destination, &contents).await?;
        info!(path = %destination.display(), precedence = %config.precedence(), "Manifest updated");
        self.reporter.report(&SyncEvent::ManifestUpdated { name: name.into() });

        Ok(1)
    }

    async fn load(&self, path: &Path) -> SplatResult<Manifest> {
        let text = self.filesystem.read_to_string(path).await?;
        Manifest::parse(&text).map_err(|e| manifest_error(path, e))
    }
}

fn manifest_error(path: &Path, source: DomainError) -> SplatError {
    ApplicationError::ManifestParse {
        path: path.to_path_buf(),
        source,
    }
    .into()
}
