//! Errors surfaced by the `splat` binary, their exit codes and how they
//! are printed.

use std::{error::Error as _, fmt::Write as _, io, path::PathBuf};

use owo_colors::OwoColorize;
use thiserror::Error;

use splat_core::error::{ErrorCategory, SplatError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Destination {} is not a directory", path.display())]
    DestinationNotADirectory { path: PathBuf },

    #[error("{message}")]
    Config { message: String },

    #[error(transparent)]
    Core(#[from] SplatError),

    #[error("Could not {action}")]
    Io {
        action: String,
        #[source]
        source: io::Error,
    },
}

impl CliError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Adapter for `map_err` on I/O results.
    pub fn io(action: impl Into<String>) -> impl FnOnce(io::Error) -> Self {
        let action = action.into();
        move |source| Self::Io { action, source }
    }

    /// 2 for bad input, 3 for a missing template, 4 for configuration,
    /// 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::DestinationNotADirectory { .. } => 2,
            Self::Config { .. } => 4,
            Self::Io { .. } => 1,
            Self::Core(core) => match core.category() {
                ErrorCategory::Validation => 2,
                ErrorCategory::NotFound => 3,
                ErrorCategory::Configuration => 4,
                ErrorCategory::Internal => 1,
            },
        }
    }

    fn hints(&self) -> Vec<String> {
        match self {
            Self::DestinationNotADirectory { .. } => {
                vec!["Pass a directory; a missing one is created".into()]
            }
            Self::Config { .. } => vec![
                "See which file is read with: splat config path".into(),
                "Write a fresh one with: splat init --force".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::Io { .. } => Vec::new(),
        }
    }

    /// `error:` line, the cause chain when `verbose`, then hints.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let mut out = String::new();
        let label = "error:";
        if color {
            let _ = writeln!(out, "{} {self}", label.red().bold());
        } else {
            let _ = writeln!(out, "{label} {self}");
        }

        let mut cause = self.source();
        while let Some(err) = cause.filter(|_| verbose) {
            let _ = writeln!(out, "  caused by: {err}");
            cause = err.source();
        }

        for hint in self.hints() {
            if color {
                let _ = writeln!(out, "  {} {hint}", "hint:".yellow());
            } else {
                let _ = writeln!(out, "  hint: {hint}");
            }
        }
        out
    }
}
