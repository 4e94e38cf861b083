//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use splat_core::domain::MergePrecedence;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
///
/// Without a subcommand, splat applies a template to `DEST`.
#[derive(Debug, Parser)]
#[command(
    name    = "splat",
    bin_name = "splat",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Splat a project template into a directory",
    long_about = "splat copies a template into a destination directory. Unchanged \
                  files are skipped, differing files are only replaced after you \
                  confirm, and package.json dependencies are merged instead of \
                  overwritten.",
    after_help = "EXAMPLES:\n\
        \x20 splat                       # default template into the current directory\n\
        \x20 splat --from react ./that-folder\n\
        \x20 splat --from react --yes ./that-folder\n\
        \x20 splat list",
    args_conflicts_with_subcommands = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Arguments for the default (apply) action.
    #[command(flatten)]
    pub apply: ApplyArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 splat list\n\
            \x20 splat list --format json\n\
            \x20 splat list --templates-dir ./my-templates"
    )]
    List(ListArgs),

    /// Initialise a splat configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 splat init\n\
            \x20 splat init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 splat completions bash > ~/.local/share/bash-completion/completions/splat\n\
            \x20 splat completions zsh  > ~/.zfunc/_splat\n\
            \x20 splat completions fish > ~/.config/fish/completions/splat.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the splat configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 splat config get manifest.precedence\n\
            \x20 splat config list\n\
            \x20 splat config path"
    )]
    Config(ConfigCommands),
}

// ── apply ─────────────────────────────────────────────────────────────────────

/// Arguments for applying a template (the default action).
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Destination directory, relative to the current directory.
    #[arg(value_name = "DEST", help = "Destination directory (default: current directory)")]
    pub dest: Option<PathBuf>,

    /// Template to use.
    #[arg(
        long = "from",
        value_name = "TEMPLATE",
        help = "Template to use (default: \"default\")"
    )]
    pub from: Option<String>,

    /// Replace every differing file without asking.
    #[arg(short = 'y', long = "yes", help = "Overwrite differing files without asking")]
    pub yes: bool,

    /// Which manifest wins when both pin the same package.
    #[arg(
        long = "prefer",
        value_name = "SIDE",
        value_enum,
        help = "Version to keep when both manifests list a package"
    )]
    pub prefer: Option<Prefer>,
}

/// Side that wins a dependency version collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Prefer {
    Template,
    /// Also accepted as `dest`.
    #[value(alias = "dest")]
    Destination,
}

impl From<Prefer> for MergePrecedence {
    fn from(prefer: Prefer) -> Self {
        match prefer {
            Prefer::Template => MergePrecedence::Template,
            Prefer::Destination => MergePrecedence::Destination,
        }
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `splat list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `splat init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `splat completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: clap_complete::Shell,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `splat config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `manifest.precedence`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_applies_default() {
        let cli = Cli::parse_from(["splat"]);
        assert!(cli.command.is_none());
        assert!(cli.apply.dest.is_none());
        assert!(cli.apply.from.is_none());
    }

    #[test]
    fn parse_dest_and_template() {
        let cli = Cli::parse_from(["splat", "--from", "react", "./that-folder"]);
        assert_eq!(cli.apply.from.as_deref(), Some("react"));
        assert_eq!(cli.apply.dest, Some(PathBuf::from("./that-folder")));
    }

    #[test]
    fn list_is_a_subcommand_not_a_destination() {
        let cli = Cli::parse_from(["splat", "list"]);
        assert!(matches!(cli.command, Some(Commands::List(_))));
    }

    #[test]
    fn prefer_dest_alias() {
        let cli = Cli::parse_from(["splat", "--prefer", "dest"]);
        assert_eq!(cli.apply.prefer, Some(Prefer::Destination));
        assert_eq!(
            MergePrecedence::from(Prefer::Destination),
            MergePrecedence::Destination
        );
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::parse_from(["splat", "list", "--templates-dir", "/tmp/t", "-v"]);
        assert_eq!(cli.global.templates_dir, Some(PathBuf::from("/tmp/t")));
        assert_eq!(cli.global.verbose, 1);
    }

    #[test]
    fn completions_take_clap_complete_shells() {
        let cli = Cli::parse_from(["splat", "completions", "powershell"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Completions(CompletionsArgs {
                shell: clap_complete::Shell::PowerShell
            }))
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["splat", "--quiet", "--verbose"]);
        assert!(result.is_err());
    }
}
