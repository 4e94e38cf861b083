//! # splat
//!
//! Applies a project template to a directory without clobbering local
//! edits: identical entries are skipped, differing ones are replaced only
//! when confirmed, and the dependency manifest is merged.
//!
//! Exit codes: 0 success, 1 I/O or internal failure, 2 bad input,
//! 3 template not found, 4 configuration.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use clap::Parser;
use tracing::debug;

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::Console,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod prompt;
mod reporter;

fn main() -> ExitCode {
    // Before parsing, so .env can supply SPLAT_TEMPLATES_DIR and NO_COLOR.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("splat: {e:#}");
        return ExitCode::FAILURE;
    }

    let verbose = cli.global.verbose > 0;
    let color = !cli.global.no_color && io::stderr().is_terminal();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(exit_code = e.exit_code(), "Run failed: {e}");
            eprint!("{}", e.render(verbose, color));
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = AppConfig::load(cli.global.config.as_ref())
        .map_err(|e| CliError::config(format!("{e:#}")))?;
    let console = Console::from_args(&cli.global, &config);
    debug!(?config, "Configuration loaded");

    match cli.command {
        None => commands::apply::execute(cli.apply, &cli.global, &config, console),
        Some(Commands::List(args)) => commands::list::execute(args, &cli.global, &config, &console),
        Some(Commands::Init(args)) => commands::init::execute(args, &console),
        Some(Commands::Completions(args)) => commands::completions::execute(args),
        Some(Commands::Config(cmd)) => commands::config::execute(cmd, &config, &console),
    }
}
