//! Per-run configuration.
//!
//! Built once by the caller and passed by reference into every service.

use std::path::{Path, PathBuf};

use crate::domain::MergePrecedence;

/// Template used when none is named.
pub const DEFAULT_TEMPLATE: &str = "default";

/// File that receives merge handling instead of a plain copy.
pub const DEFAULT_MANIFEST_NAME: &str = "package.json";

/// Everything one splat run needs to know about where to read and write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplatConfig {
    template_name: String,
    template_path: PathBuf,
    output_dir: PathBuf,
    manifest_name: String,
    precedence: MergePrecedence,
}

impl SplatConfig {
    pub fn new(
        template_name: impl Into<String>,
        template_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            template_name: template_name.into(),
            template_path: template_path.into(),
            output_dir: output_dir.into(),
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            precedence: MergePrecedence::default(),
        }
    }

    pub fn with_manifest_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_name = name.into();
        self
    }

    pub fn with_precedence(mut self, precedence: MergePrecedence) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn manifest_name(&self) -> &str {
        &self.manifest_name
    }

    pub fn precedence(&self) -> MergePrecedence {
        self.precedence
    }

    /// Template entries that go through the file synchronizer.
    pub fn copyable_entries<'a>(&self, entries: &'a [String]) -> Vec<&'a str> {
        entries
            .iter()
            .map(String::as_str)
            .filter(|entry| *entry != self.manifest_name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_package_json_and_template_precedence() {
        let cfg = SplatConfig::new("default", "/t/default", "/out");
        assert_eq!(cfg.manifest_name(), "package.json");
        assert_eq!(cfg.precedence(), MergePrecedence::Template);
    }

    #[test]
    fn copyable_entries_exclude_manifest() {
        let cfg = SplatConfig::new("default", "/t", "/out").with_manifest_name("deps.json");
        let entries = vec!["README.md".to_string(), "deps.json".to_string(), "package.json".to_string()];
        assert_eq!(cfg.copyable_entries(&entries), ["README.md", "package.json"]);
    }
}
