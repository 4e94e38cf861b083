//! Content hashes used to compare template and destination entries.
//!
//! Hashes are rendered in the canonical `sha256:<hex>` format. Metadata such
//! as size or mtime never takes part in the comparison.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Prefix for all hashes produced by this module.
const PREFIX: &str = "sha256:";

/// SHA-256 digest of a file's bytes, or of a directory's file listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(String);

impl ContentHash {
    /// Hash a complete in-memory buffer.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut hasher = ContentHasher::new();
        hasher.update(bytes);
        hasher.finish()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Incremental hasher fed chunk by chunk while a file is streamed.
#[derive(Clone, Default)]
pub struct ContentHasher {
    inner: Sha256,
}

impl ContentHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, chunk: &[u8]) {
        self.inner.update(chunk);
    }

    pub fn finish(self) -> ContentHash {
        ContentHash(format!("{}{:x}", PREFIX, self.inner.finalize()))
    }
}

/// Builds a single hash for a directory tree from its files' hashes.
///
/// Records are sorted by relative path before hashing, so the walk order of
/// the underlying filesystem does not matter. A path recorded as missing
/// hashes differently from any present file.
#[derive(Debug, Default)]
pub struct DirectoryDigest {
    records: Vec<(String, Option<ContentHash>)>,
}

impl DirectoryDigest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, identified by its `/`-separated path relative to the root.
    pub fn add(&mut self, relative_path: impl Into<String>, hash: ContentHash) {
        self.records.push((relative_path.into(), Some(hash)));
    }

    /// Record that a file expected at `relative_path` is absent.
    pub fn add_missing(&mut self, relative_path: impl Into<String>) {
        self.records.push((relative_path.into(), None));
    }

    pub fn finish(mut self) -> ContentHash {
        self.records.sort_by(|a, b| a.0.cmp(&b.0));

        let mut hasher = ContentHasher::new();
        for (path, hash) in &self.records {
            hasher.update(path.as_bytes());
            hasher.update(&[0]);
            match hash {
                Some(hash) => hasher.update(hash.as_str().as_bytes()),
                None => hasher.update(b"-"),
            }
            hasher.update(b"\n");
        }
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_has_prefix() {
        assert!(ContentHash::of_bytes(b"hello world").as_str().starts_with("sha256:"));
    }

    #[test]
    fn hash_known_value() {
        assert_eq!(
            ContentHash::of_bytes(b"hello world").as_str(),
            "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn chunked_hash_matches_whole_buffer() {
        let mut hasher = ContentHasher::new();
        hasher.update(b"hello ");
        hasher.update(b"world");
        assert_eq!(hasher.finish(), ContentHash::of_bytes(b"hello world"));
    }

    #[test]
    fn directory_digest_ignores_insertion_order() {
        let mut a = DirectoryDigest::new();
        a.add("src/main.rs", ContentHash::of_bytes(b"fn main() {}"));
        a.add("README.md", ContentHash::of_bytes(b"# hi"));

        let mut b = DirectoryDigest::new();
        b.add("README.md", ContentHash::of_bytes(b"# hi"));
        b.add("src/main.rs", ContentHash::of_bytes(b"fn main() {}"));

        assert_eq!(a.finish(), b.finish());
    }

    #[test]
    fn directory_digest_sees_renames() {
        let mut a = DirectoryDigest::new();
        a.add("a.txt", ContentHash::of_bytes(b"x"));
        let mut b = DirectoryDigest::new();
        b.add("b.txt", ContentHash::of_bytes(b"x"));

        assert_ne!(a.finish(), b.finish());
    }

    #[test]
    fn missing_file_differs_from_present_file() {
        let mut present = DirectoryDigest::new();
        present.add("a.txt", ContentHash::of_bytes(b""));
        let mut missing = DirectoryDigest::new();
        missing.add_missing("a.txt");

        assert_ne!(present.finish(), missing.finish());
    }
}
