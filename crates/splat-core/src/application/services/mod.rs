//! Application services - orchestrate use cases.
//!
//! `SplatService` runs a whole template application; it drives the
//! `FileSynchronizer` and then the `ManifestMerger`.

pub mod file_sync;
pub mod manifest_merge;
pub mod splat_service;

pub use file_sync::FileSynchronizer;
pub use manifest_merge::ManifestMerger;
pub use splat_service::{SplatService, SplatSummary};
