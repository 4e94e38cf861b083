// ============================================================================
// domain/error.rs - MANIFEST SHAPE ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant is a problem with the manifest the user wrote, so all of
/// them surface as validation errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Manifest is not valid JSON: {reason}")]
    InvalidManifest { reason: String },

    #[error("Manifest must be a JSON object at the top level")]
    ManifestNotObject,

    #[error("Manifest section '{section}' must be an object of package versions")]
    InvalidSection { section: String },

    #[error("Version of '{package}' in '{section}' must be a string")]
    InvalidVersion { section: String, package: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidManifest { reason } => vec![
                "The dependency manifest could not be parsed".into(),
                format!("Details: {}", reason),
                "Fix the JSON syntax and run splat again".into(),
            ],
            Self::ManifestNotObject => {
                vec!["A manifest must start with '{' and end with '}'".into()]
            }
            Self::InvalidSection { section } => vec![
                format!("'{}' should look like {{ \"name\": \"^1.0.0\" }}", section),
            ],
            Self::InvalidVersion { package, .. } => {
                vec![format!("Quote the version of '{}', e.g. \"^1.0.0\"", package)]
            }
        }
    }
}
