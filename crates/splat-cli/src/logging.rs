//! Log setup for the binary. `splat-core` and `splat-adapters` only emit.
//!
//! Logs go to stderr; stdout carries the run's own messages and
//! `splat list --format json`. `RUST_LOG` replaces the level chosen by
//! `-v`/`-q` entirely.

use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

use crate::cli::GlobalArgs;

/// Crates whose events are shown by default.
const TARGETS: [&str; 3] = ["splat", "splat_core", "splat_adapters"];

pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directives(args.log_level()))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(!args.no_color && io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging was already initialised: {e}"))
}

fn directives(level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_covers_every_splat_crate() {
        assert_eq!(
            directives("debug"),
            "splat=debug,splat_core=debug,splat_adapters=debug"
        );
    }

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(directives("warn")).is_ok());
    }
}
