//! Shell completion scripts on stdout.

use clap::CommandFactory;

use crate::{
    cli::{Cli, CompletionsArgs},
    error::CliResult,
};

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    clap_complete::generate(args.shell, &mut Cli::command(), "splat", &mut std::io::stdout());
    Ok(())
}
