//! Flags shared by the apply action and every subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args};

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Log more: -v for skipped and declined entries, -vv for every hash
    /// decision, -vvv for the hashes themselves.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print errors only.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never colour output. Also set by a non-empty NO_COLOR.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read settings from FILE instead of the platform config file.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory whose subdirectories are the templates.
    #[arg(long, global = true, value_name = "DIR", env = "SPLAT_TEMPLATES_DIR")]
    pub templates_dir: Option<PathBuf>,
}

impl GlobalArgs {
    /// Level for splat's own log targets when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "info",
            (false, 2) => "debug",
            (false, _) => "trace",
        }
    }
}
