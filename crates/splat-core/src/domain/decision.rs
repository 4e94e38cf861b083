//! Per-entry synchronization decisions and the status events they produce.

use crate::domain::ContentHash;

/// What to do with one template entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDecision {
    /// Destination is absent; copy without asking.
    Copy,
    /// Destination already holds identical content.
    Skip,
    /// Destination differs; overwrite only if the user agrees.
    Confirm,
}

impl SyncDecision {
    pub fn decide(source: &ContentHash, destination: Option<&ContentHash>) -> Self {
        match destination {
            None => Self::Copy,
            Some(existing) if existing == source => Self::Skip,
            Some(_) => Self::Confirm,
        }
    }
}

/// Status updates emitted while a template is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// An entry was written to the destination.
    Copied { name: String },
    /// An entry already matched and was left alone.
    Unchanged { name: String },
    /// The user declined to overwrite a differing entry.
    Declined { name: String },
    /// The destination had no manifest and received the template's verbatim.
    ManifestCreated { name: String },
    /// The destination manifest was rewritten with merged dependencies.
    ManifestUpdated { name: String },
    /// Merging changed nothing in the destination manifest.
    ManifestUnchanged { name: String },
}

impl SyncEvent {
    /// `true` for events that correspond to a filesystem write.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Self::Copied { .. } | Self::ManifestCreated { .. } | Self::ManifestUpdated { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_destination_copies() {
        let src = ContentHash::of_bytes(b"a");
        assert_eq!(SyncDecision::decide(&src, None), SyncDecision::Copy);
    }

    #[test]
    fn identical_destination_skips() {
        let src = ContentHash::of_bytes(b"a");
        let dst = ContentHash::of_bytes(b"a");
        assert_eq!(SyncDecision::decide(&src, Some(&dst)), SyncDecision::Skip);
    }

    #[test]
    fn differing_destination_asks() {
        let src = ContentHash::of_bytes(b"a");
        let dst = ContentHash::of_bytes(b"b");
        assert_eq!(SyncDecision::decide(&src, Some(&dst)), SyncDecision::Confirm);
    }

    #[test]
    fn only_writes_count_as_writes() {
        assert!(SyncEvent::Copied { name: "a".into() }.is_write());
        assert!(SyncEvent::ManifestUpdated { name: "package.json".into() }.is_write());
        assert!(!SyncEvent::Declined { name: "a".into() }.is_write());
        assert!(!SyncEvent::ManifestUnchanged { name: "package.json".into() }.is_write());
    }
}
