//! Console implementation of the core `Reporter` port.

use tracing::{debug, info, warn};

use splat_core::{application::ports::Reporter, domain::SyncEvent};

use crate::output::{Console, Tone};

/// Prints write events; no-op events only go to the log.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    console: Console,
}

impl ConsoleReporter {
    pub fn new(console: Console) -> Self {
        Self { console }
    }

    fn line(event: &SyncEvent) -> Option<(Tone, String)> {
        match event {
            SyncEvent::Copied { name } => Some((Tone::Plain, format!("Splatting {name}..."))),
            SyncEvent::ManifestCreated { name } => Some((
                Tone::Done,
                format!("Wrote {name} with dependencies, {}", install_hint(name)),
            )),
            SyncEvent::ManifestUpdated { name } => Some((
                Tone::Done,
                format!("Updated {name} with new dependencies, {}", install_hint(name)),
            )),
            SyncEvent::Unchanged { name } => {
                debug!(entry = %name, "Identical, skipped");
                None
            }
            SyncEvent::Declined { name } => {
                info!(entry = %name, "Kept existing");
                None
            }
            SyncEvent::ManifestUnchanged { name } => {
                info!(manifest = %name, "Dependencies already up to date");
                None
            }
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, event: &SyncEvent) {
        let Some((tone, line)) = Self::line(event) else {
            return;
        };
        if let Err(e) = self.console.say(tone, &line) {
            warn!("Failed to write progress: {e}");
        }
    }
}

/// What to run after the manifest gained dependencies. Only `package.json`
/// names its tools; any other manifest gets a generic nudge.
fn install_hint(manifest: &str) -> &'static str {
    match manifest {
        "package.json" => "run npm i/yarn to install them",
        _ => "run your package manager's install to fetch them",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_json_names_npm_and_yarn() {
        let (_, line) = ConsoleReporter::line(&SyncEvent::ManifestCreated {
            name: "package.json".into(),
        })
        .unwrap();
        assert_eq!(
            line,
            "Wrote package.json with dependencies, run npm i/yarn to install them"
        );
    }

    #[test]
    fn other_manifests_get_a_generic_hint() {
        let (_, line) = ConsoleReporter::line(&SyncEvent::ManifestUpdated {
            name: "deps.json".into(),
        })
        .unwrap();
        assert_eq!(
            line,
            "Updated deps.json with new dependencies, run your package manager's install to fetch them"
        );
        assert!(!line.contains("npm"));
    }

    #[test]
    fn skipped_entries_print_nothing() {
        assert!(ConsoleReporter::line(&SyncEvent::Unchanged { name: "a".into() }).is_none());
        assert!(ConsoleReporter::line(&SyncEvent::Declined { name: "a".into() }).is_none());
    }
}
