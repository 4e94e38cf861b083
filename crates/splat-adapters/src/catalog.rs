//! Built-in template catalog.
//!
//! Templates are plain directories under a single root; a template's name is
//! its directory name. The root defaults to the platform data directory
//! (`~/.local/share/splat/templates` on Linux) and can be overridden.

use std::{
    io,
    path::{Component, Path, PathBuf},
};

use tracing::debug;

use splat_core::{
    application::ApplicationError,
    error::{SplatError, SplatResult},
};

/// Locates named templates under a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCatalog {
    root: PathBuf,
}

impl TemplateCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Catalog rooted at the platform data directory.
    pub fn from_default_root() -> Self {
        Self::new(Self::default_root())
    }

    /// Default templates root.
    ///
    /// Uses `directories::ProjectDirs`, falling back to `./templates`.
    pub fn default_root() -> PathBuf {
        directories::ProjectDirs::from("com", "splat", "splat")
            .map(|d| d.data_dir().join("templates"))
            .unwrap_or_else(|| PathBuf::from("templates"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the template called `name`. Existence is not checked here.
    pub fn resolve(&self, name: &str) -> SplatResult<PathBuf> {
        let mut components = Path::new(name).components();
        let is_single_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );

        if name.is_empty() || !is_single_name || name.contains(['/', '\\']) {
            return Err(ApplicationError::InvalidTemplateName {
                name: name.to_string(),
            }
            .into());
        }

        let path = self.root.join(name);
        debug!(template = name, path = %path.display(), "Template resolved");
        Ok(path)
    }

    /// Names of every template directory, sorted. A missing root is empty.
    pub fn list(&self) -> SplatResult<Vec<String>> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(map_io_error(&self.root, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(&self.root, e))?;
            let is_dir = entry
                .file_type()
                .map_err(|e| map_io_error(&entry.path(), e))?
                .is_dir();
            if is_dir {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        names.sort();
        Ok(names)
    }
}

fn map_io_error(path: &Path, e: io::Error) -> SplatError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to read template catalog: {}", e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_joins_name_onto_root() {
        let catalog = TemplateCatalog::new("/opt/splat");
        assert_eq!(
            catalog.resolve("react").unwrap(),
            PathBuf::from("/opt/splat/react")
        );
    }

    #[test]
    fn resolve_rejects_traversal() {
        let catalog = TemplateCatalog::new("/opt/splat");
        for name in ["", "..", "../etc", "a/b", "/abs", "a\\b", "."] {
            assert!(
                matches!(
                    catalog.resolve(name),
                    Err(SplatError::Application(ApplicationError::InvalidTemplateName { .. }))
                ),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn list_returns_sorted_directories_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("react")).unwrap();
        std::fs::create_dir(dir.path().join("default")).unwrap();
        std::fs::write(dir.path().join("README.md"), "not a template").unwrap();

        let names = TemplateCatalog::new(dir.path()).list().unwrap();
        assert_eq!(names, ["default", "react"]);
    }

    #[test]
    fn missing_root_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = TemplateCatalog::new(dir.path().join("nowhere"));
        assert!(catalog.list().unwrap().is_empty());
    }

    #[test]
    fn default_root_is_not_empty() {
        assert!(!TemplateCatalog::default_root().as_os_str().is_empty());
    }
}
