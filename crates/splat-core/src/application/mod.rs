//! Application layer for splat.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (SplatService, FileSynchronizer, ManifestMerger)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Config**: The per-run `SplatConfig`
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! decision rules itself. Those live in `crate::domain`.

pub mod config;
pub mod error;
pub mod ports;
pub mod services;

pub use config::{DEFAULT_MANIFEST_NAME, DEFAULT_TEMPLATE, SplatConfig};

pub use services::{FileSynchronizer, ManifestMerger, SplatService, SplatSummary};

// Re-export port traits (for adapter implementation)
pub use ports::{EntryKind, Filesystem, Prompt, Reporter};

pub use error::ApplicationError;
