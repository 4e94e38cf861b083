//! Infrastructure adapters for splat.
//!
//! This crate implements the ports defined in `splat-core::application::ports`.
//! It contains all filesystem I/O and the built-in template catalog.

pub mod catalog;
pub mod filesystem;

// Re-export commonly used adapters
pub use catalog::TemplateCatalog;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
