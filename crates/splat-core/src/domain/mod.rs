//! Core domain layer for splat.
//!
//! Pure decision logic: no filesystem, no prompts, no printing. All I/O is
//! reached through the ports in `crate::application::ports`.
//!
//! - `content_hash`: SHA-256 content identity for files and directory trees
//! - `decision`: copy / skip / confirm rules and the status events they emit
//! - `manifest`: dependency manifest parsing and the merge rules
pub mod content_hash;
pub mod decision;
pub mod error;
pub mod manifest;

pub use content_hash::{ContentHash, ContentHasher, DirectoryDigest};
pub use decision::{SyncDecision, SyncEvent};
pub use error::DomainError;
pub use manifest::{DEPENDENCY_SECTIONS, DependencyMap, Manifest, MergePrecedence};
