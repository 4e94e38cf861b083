//! Unified error handling for Splat Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Splat Core operations.
#[derive(Debug, Error, Clone)]
pub enum SplatError {
    /// Errors from the domain layer (manifest shape violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SplatError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in splat".into(),
                "Please report this issue at: https://github.com/cosecruz/splat/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(_) => ErrorCategory::Validation,
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type SplatResult<T> = Result<T, SplatError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn missing_template_is_not_found() {
        let err: SplatError = ApplicationError::TemplateNotFound {
            name: "react".into(),
            path: PathBuf::from("/templates/react"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn filesystem_errors_are_internal() {
        let err: SplatError = ApplicationError::FilesystemError {
            path: PathBuf::from("/out/a.txt"),
            reason: "permission denied".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn domain_manifest_errors_are_validation() {
        let err: SplatError = DomainError::ManifestNotObject.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }
}
