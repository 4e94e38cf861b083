//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O. Manifest shape
//! errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;
use crate::error::ErrorCategory;

/// Errors that occur while applying a template.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The resolved template path does not exist.
    #[error("Template \"{name}\" not found")]
    TemplateNotFound { name: String, path: PathBuf },

    /// The resolved template path exists but is a file.
    #[error("Template \"{name}\" is not a directory")]
    TemplateNotADirectory { name: String, path: PathBuf },

    /// Template names are single path components.
    #[error("Invalid template name \"{name}\"")]
    InvalidTemplateName { name: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A manifest could not be read as a dependency document.
    #[error("Could not parse manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: DomainError,
    },

    /// The confirmation prompt could not be shown or answered.
    #[error("Confirmation prompt failed: {reason}")]
    PromptFailed { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { path, .. } => vec![
                format!("Looked for: {}", path.display()),
                "Try: splat list to see available templates".into(),
                "Or point --templates-dir at another template root".into(),
            ],
            Self::TemplateNotADirectory { path, .. } => vec![
                format!("{} is a file", path.display()),
                "Templates are directories of files to copy".into(),
            ],
            Self::InvalidTemplateName { .. } => vec![
                "Template names cannot contain '/', '\\' or '..'".into(),
                "Try: splat list to see available templates".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Files copied before the failure were left in place".into(),
            ],
            Self::ManifestParse { path, source } => {
                let mut suggestions = vec![format!("Fix the JSON in {}", path.display())];
                suggestions.extend(source.suggestions());
                suggestions.push("Files copied before the failure were left in place".into());
                suggestions
            }
            Self::PromptFailed { .. } => vec![
                "Run splat from an interactive terminal".into(),
                "Or pass --yes to accept every overwrite".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::TemplateNotADirectory { .. } | Self::InvalidTemplateName { .. } => {
                ErrorCategory::Validation
            }
            Self::ManifestParse { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::PromptFailed { .. } => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_parse_keeps_domain_suggestions() {
        let err = ApplicationError::ManifestParse {
            path: PathBuf::from("/work/package.json"),
            source: DomainError::InvalidVersion {
                section: "dependencies".into(),
                package: "react".into(),
            },
        };

        let suggestions = err.suggestions();
        assert_eq!(suggestions[0], "Fix the JSON in /work/package.json");
        assert!(suggestions.iter().any(|s| s.contains("Quote the version of 'react'")));
        assert!(std::error::Error::source(&err).is_some());
    }
}
